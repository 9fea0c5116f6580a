//! Collection reconciler
//!
//! Fetches the catalog and the account's owned items concurrently, joins
//! both, and merges them into an ordered list of [`CollectionEntry`].
//!
//! # Outcome precedence
//! Evaluated only after both fetches have finished:
//! 1. Catalog fetch failed → [`CollectionError::CatalogUnavailable`]
//! 2. Ownership fetch failed → [`CollectionError::OwnershipUnavailable`]
//! 3. Either fetch task ended abnormally (panic, abort) → [`CollectionError::Unclassified`]
//! 4. Otherwise merge
//!
//! Each fetch runs as its own tokio task. The handles abort their task when
//! dropped, so dropping an in-flight `reconcile` future cancels both fetches.

use crate::error::CollectionError;
use crate::models::{CatalogItem, CollectionEntry, OwnershipRecord};
use crate::types::{CatalogSource, OwnershipSource, SourceError};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, info, warn};

type FetchOutcome<T> = Result<Result<Vec<T>, SourceError>, JoinError>;

/// Joins catalog and ownership fetches into collection entries
///
/// Holds no per-call state; one instance may serve concurrent callers.
#[derive(Clone)]
pub struct CollectionReconciler {
    catalog: Arc<dyn CatalogSource>,
    ownership: Arc<dyn OwnershipSource>,
}

impl CollectionReconciler {
    pub fn new(catalog: Arc<dyn CatalogSource>, ownership: Arc<dyn OwnershipSource>) -> Self {
        Self { catalog, ownership }
    }

    /// Fetch both sources concurrently and merge
    pub async fn reconcile(&self) -> Result<Vec<CollectionEntry>, CollectionError> {
        let catalog_source = Arc::clone(&self.catalog);
        let ownership_source = Arc::clone(&self.ownership);

        debug!("Starting catalog and ownership fetches");

        let catalog_task = AbortOnDropHandle::new(tokio::spawn(async move {
            catalog_source.fetch_catalog().await
        }));
        let ownership_task = AbortOnDropHandle::new(tokio::spawn(async move {
            ownership_source.fetch_owned().await
        }));

        // Join, not race: a failure on one side never cuts the other short.
        let (catalog, owned) = tokio::join!(catalog_task, ownership_task);

        let result = settle(catalog, owned);
        match &result {
            Ok(entries) => info!(
                total = entries.len(),
                owned = entries.iter().filter(|e| e.owned).count(),
                "Collection reconciled"
            ),
            Err(e) => warn!(kind = %e.kind(), error = %e, "Collection reconciliation failed"),
        }
        result
    }

    /// Like [`reconcile`](Self::reconcile), abandoning the work when `token` fires
    ///
    /// Returns `None` on cancellation; both fetch tasks are aborted.
    pub async fn reconcile_until_cancelled(
        &self,
        token: &CancellationToken,
    ) -> Option<Result<Vec<CollectionEntry>, CollectionError>> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Collection reconciliation cancelled");
                None
            }
            result = self.reconcile() => Some(result),
        }
    }
}

/// Apply outcome precedence to the two joined fetch results
fn settle(
    catalog: FetchOutcome<CatalogItem>,
    owned: FetchOutcome<OwnershipRecord>,
) -> Result<Vec<CollectionEntry>, CollectionError> {
    match (catalog, owned) {
        (Ok(Err(e)), _) => Err(CollectionError::CatalogUnavailable(e)),
        (Ok(Ok(_)), Ok(Err(e))) => Err(CollectionError::OwnershipUnavailable(e)),
        (Ok(Ok(catalog)), Ok(Ok(owned))) => Ok(merge(catalog, &owned)),
        (Err(join_error), _) | (_, Err(join_error)) => {
            Err(CollectionError::Unclassified(join_error.to_string()))
        }
    }
}

/// Annotate each catalog item with ownership, preserving catalog order
///
/// O(n + m): ownership is indexed by id before the scan.
pub fn merge(catalog: Vec<CatalogItem>, owned: &[OwnershipRecord]) -> Vec<CollectionEntry> {
    let owned_ids: HashSet<i64> = owned.iter().map(|record| record.item_id).collect();

    catalog
        .into_iter()
        .map(|item| {
            if owned_ids.contains(&item.id) {
                CollectionEntry::owned(item)
            } else {
                CollectionEntry::unowned(item.id, item.index)
            }
        })
        .collect()
}
