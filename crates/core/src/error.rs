//! Shared error type for the client core.

use thiserror::Error;

/// Domain-level errors raised before any network call is made.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no files selected")]
    EmptySelection,

    #[error("file type not accepted: {0}")]
    UnsupportedFileType(String),

    #[error("file {name} exceeds the {max_bytes} byte limit")]
    FileTooLarge { name: String, max_bytes: u64 },

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Alias used throughout the client crates.
pub type Result<T> = std::result::Result<T, CoreError>;
