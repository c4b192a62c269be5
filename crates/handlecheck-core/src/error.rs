//! Core error types for handlecheck.

use thiserror::Error;

/// Errors raised by the core data model.
///
/// None of these ever reach a bulk caller: the checker turns them into
/// [`CheckResult`](crate::CheckResult) values before returning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Handle does not satisfy the format rules
    #[error("invalid handle '{handle}': {reason}")]
    InvalidHandle {
        /// Raw input as supplied by the caller
        handle: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Resolver configuration value out of range
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;
