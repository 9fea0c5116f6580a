//! # Dogedex Common Library
//!
//! Shared code for the dogedex workspace:
//! - Configuration loading (TOML file, environment, command-line overrides)
//! - Wire envelope and DTO types for the dog catalog API
//! - Common error type

pub mod api;
pub mod config;
pub mod error;

pub use error::{Error, Result};
