//! # Sync Error Types
//!
//! Errors surfaced by the few fallible entry points of the crate.
//!
//! Lock, unlock and wait never return errors. Misuse of those is logged and
//! ignored; see the crate docs for the failure policy.

use thiserror::Error;

/// Errors that can occur in the concurrency core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A blocking wait was released by cancellation instead of by data.
    #[error("operation canceled")]
    Canceled,

    /// Configuration values failed to parse or validate.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for concurrency core operations.
pub type SyncResult<T> = Result<T, SyncError>;
