//! Collection view model
//!
//! Drives reconciliation on behalf of a screen and publishes the resulting
//! status through a `watch` channel. `None` means "nothing to show": the
//! initial state, a dismissed error, or a cancelled refresh.
//!
//! A [`ResultPresenter`] attached with [`run_presenter`] renders every status
//! change until the view model is dropped.

use crate::error::{CollectionError, ErrorKind};
use crate::models::CatalogItem;
use crate::reconciler::CollectionReconciler;
use crate::status::{CollectionStatus, ResponseStatus};
use crate::types::DogService;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Renders collection statuses
///
/// Receives a shared reference: presenters never mutate the sequence.
pub trait ResultPresenter: Send {
    fn present(&mut self, status: Option<&CollectionStatus>);
}

/// View model for the collection screen
pub struct CollectionViewModel {
    reconciler: CollectionReconciler,
    service: Arc<dyn DogService>,
    status_tx: watch::Sender<Option<CollectionStatus>>,
}

impl CollectionViewModel {
    pub fn new(reconciler: CollectionReconciler, service: Arc<dyn DogService>) -> Self {
        let (status_tx, _) = watch::channel(None);
        Self {
            reconciler,
            service,
            status_tx,
        }
    }

    /// Receiver observing every published status
    pub fn subscribe(&self) -> watch::Receiver<Option<CollectionStatus>> {
        self.status_tx.subscribe()
    }

    /// Current status snapshot
    pub fn status(&self) -> Option<CollectionStatus> {
        self.status_tx.borrow().clone()
    }

    /// Publish `Loading`, reconcile, publish the outcome
    pub async fn refresh(&self) -> CollectionStatus {
        self.status_tx.send_replace(Some(ResponseStatus::Loading));
        let status = CollectionStatus::from(self.reconciler.reconcile().await);
        self.status_tx.send_replace(Some(status.clone()));
        status
    }

    /// Like [`refresh`](Self::refresh); on cancellation the status returns to `None`
    pub async fn refresh_until_cancelled(&self, token: &CancellationToken) -> Option<CollectionStatus> {
        self.status_tx.send_replace(Some(ResponseStatus::Loading));
        let status = self
            .reconciler
            .reconcile_until_cancelled(token)
            .await
            .map(CollectionStatus::from);
        self.status_tx.send_replace(status.clone());
        status
    }

    /// Dismiss the current status (e.g. after the error dialog is closed)
    pub fn reset_status(&self) {
        self.status_tx.send_replace(None);
    }

    /// Add an item to the account's collection
    pub async fn add_to_collection(&self, item_id: i64) -> ResponseStatus<()> {
        match self.service.add_to_collection(item_id).await {
            Ok(()) => ResponseStatus::Success(()),
            Err(e) => {
                warn!(item_id, error = %e, "Adding item to collection failed");
                ResponseStatus::Error(ErrorKind::Unclassified)
            }
        }
    }

    /// Resolve a recognizer label to a catalog item
    pub async fn lookup_by_ml_id(&self, ml_id: &str) -> ResponseStatus<CatalogItem> {
        self.service
            .find_by_ml_id(ml_id)
            .await
            .map_err(|e| {
                warn!(ml_id, error = %e, "Lookup by recognizer label failed");
                CollectionError::Unclassified(e.to_string())
            })
            .into()
    }
}

/// Feed every status change to `presenter` until the sender is dropped
///
/// Intermediate statuses may be coalesced if the presenter falls behind;
/// the latest one is always rendered. Returns the presenter.
pub async fn run_presenter<P: ResultPresenter>(
    mut status_rx: watch::Receiver<Option<CollectionStatus>>,
    mut presenter: P,
) -> P {
    presenter.present(status_rx.borrow_and_update().as_ref());
    while status_rx.changed().await.is_ok() {
        presenter.present(status_rx.borrow_and_update().as_ref());
    }
    presenter
}
