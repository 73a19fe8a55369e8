//! Storage error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur while reading or writing the store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No request carries the given id
    #[error("Request not found: {0}")]
    RequestNotFound(i64),

    /// No account is registered under the given email
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Every id above the highest stored one is taken
    #[error("Request id space exhausted after {0}")]
    IdOverflow(i64),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
