//! Response status passed to presenters
//!
//! Replaces observable UI state with an explicit value: a presenter renders
//! whatever status it is handed and never reaches back into the workflow.

use crate::error::{CollectionError, ErrorKind};
use crate::models::CollectionEntry;

/// Tri-state outcome of a request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseStatus<T> {
    Loading,
    Success(T),
    Error(ErrorKind),
}

/// Status of a collection refresh
pub type CollectionStatus = ResponseStatus<Vec<CollectionEntry>>;

impl<T> ResponseStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResponseStatus::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResponseStatus::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResponseStatus::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Message identifier when this is an error
    pub fn message_id(&self) -> Option<&'static str> {
        match self {
            ResponseStatus::Error(kind) => Some(kind.message_id()),
            _ => None,
        }
    }
}

impl<T> From<Result<T, CollectionError>> for ResponseStatus<T> {
    fn from(result: Result<T, CollectionError>) -> Self {
        match result {
            Ok(data) => ResponseStatus::Success(data),
            Err(e) => ResponseStatus::Error(e.kind()),
        }
    }
}
