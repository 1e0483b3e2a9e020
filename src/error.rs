//! Page-level error types
//!
//! Every failure in Guardian degrades to a default or a refused transition;
//! these are the refusals.

use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by page operations
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Input refused; the state was not changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Change applied in memory but could not be persisted
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Delayed work was requested with no tokio runtime to run it on
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for page operations
pub type GuardianResult<T> = Result<T, GuardianError>;
