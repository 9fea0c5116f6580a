//! dogedex-collection library
//!
//! Builds the "dog collection" view: the full reference catalog with every
//! item the account owns revealed and every other item reduced to its
//! position.

pub mod error;
pub mod models;
pub mod presenter;
pub mod reconciler;
pub mod services;
pub mod status;
pub mod types;
pub mod view_model;

pub use crate::error::{CollectionError, ErrorKind};
pub use crate::reconciler::CollectionReconciler;
pub use crate::status::{CollectionStatus, ResponseStatus};
pub use crate::view_model::{CollectionViewModel, ResultPresenter};
