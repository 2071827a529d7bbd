//! Error types for vault operations
//!
//! Field validation failures are not errors; they are reported per-field by
//! the validator. This enum covers the recoverable failures of loading
//! persisted or imported data.

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors surfaced when handling persisted or imported data
#[derive(Debug, Error)]
pub enum VaultError {
    /// The payload was not JSON at all
    #[error("Not a valid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top-level shape was wrong
    #[error("Imported data must be an array of book records")]
    NotAnArray,

    /// Every entry in a non-empty array was structurally invalid
    #[error("Imported data contains no valid book records")]
    NoValidRecords,
}
