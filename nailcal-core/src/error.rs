//! Error types for the nailcal ecosystem.

use thiserror::Error;

/// Errors that can occur in nailcal operations.
///
/// All variants carry a short user-facing message; the system deliberately
/// has no machine-readable error codes.
#[derive(Error, Debug)]
pub enum SalonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for nailcal operations.
pub type SalonResult<T> = Result<T, SalonError>;
