//! Source traits and transport errors
//!
//! The reconciler and view model only see these traits. `HttpDogApi`
//! implements all three against the dog catalog API; tests substitute
//! in-memory fakes.
//!
//! # Example
//! ```rust,ignore
//! use dogedex_collection::types::{CatalogSource, SourceError};
//!
//! struct FixedCatalog(Vec<CatalogItem>);
//!
//! #[async_trait::async_trait]
//! impl CatalogSource for FixedCatalog {
//!     async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, SourceError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

use crate::models::{CatalogItem, OwnershipRecord};
use thiserror::Error;

/// Transport-level failure of a source call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Envelope answered with `is_success == false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Endpoint requires an auth token but none is configured")]
    MissingToken,
}

/// Full reference catalog
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every catalog item, in catalog order
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, SourceError>;
}

/// Items associated with the current account
#[async_trait::async_trait]
pub trait OwnershipSource: Send + Sync {
    async fn fetch_owned(&self) -> Result<Vec<OwnershipRecord>, SourceError>;
}

/// Single-item calls outside the reconciliation workflow
#[async_trait::async_trait]
pub trait DogService: Send + Sync {
    /// Register a catalog item in the account's collection
    async fn add_to_collection(&self, item_id: i64) -> Result<(), SourceError>;

    /// Resolve a recognizer label to its catalog item
    async fn find_by_ml_id(&self, ml_id: &str) -> Result<CatalogItem, SourceError>;
}
