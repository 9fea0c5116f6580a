//! Error types for dogedex-collection
//!
//! Every failure the reconciler reports falls in one of three kinds. Each
//! kind has a stable message identifier for presenters to localise and a
//! default human-readable message.

use crate::types::SourceError;
use std::fmt;
use thiserror::Error;

/// Classified failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CatalogUnavailable,
    OwnershipUnavailable,
    Unclassified,
}

impl ErrorKind {
    /// Stable identifier for user-facing messages
    pub fn message_id(&self) -> &'static str {
        match self {
            ErrorKind::CatalogUnavailable => "catalog_unavailable",
            ErrorKind::OwnershipUnavailable => "ownership_unavailable",
            ErrorKind::Unclassified => "unknown_error",
        }
    }

    /// Default English message
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::CatalogUnavailable => "Could not download the dog catalog. Check your connection and try again.",
            ErrorKind::OwnershipUnavailable => "Could not download your collection. Check your connection and try again.",
            ErrorKind::Unclassified => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_id())
    }
}

/// Reconciliation failure
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] SourceError),

    #[error("Ownership unavailable: {0}")]
    OwnershipUnavailable(#[source] SourceError),

    /// Neither a success nor a classified source failure
    #[error("Unclassified failure: {0}")]
    Unclassified(String),
}

impl CollectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::CatalogUnavailable(_) => ErrorKind::CatalogUnavailable,
            CollectionError::OwnershipUnavailable(_) => ErrorKind::OwnershipUnavailable,
            CollectionError::Unclassified(_) => ErrorKind::Unclassified,
        }
    }
}
