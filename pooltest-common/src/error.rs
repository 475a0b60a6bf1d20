//! Common error types for pooltest

use thiserror::Error;

/// Common result type for pooltest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and configuration errors
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend error
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure of a single storage operation
///
/// Surfaced to HTTP clients only as a generic 500; the detail is for logs.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Query or connection failure in the relational store
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File open/write failure in the append log
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is write-only
    #[error("Listing is not supported by the {0} backend")]
    ListingUnsupported(&'static str),
}
