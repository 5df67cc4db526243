//! Error types for WaveCrate.

use thiserror::Error;

/// Main error type for WaveCrate operations.
#[derive(Error, Debug)]
pub enum WaveCrateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Peaks error: {0}")]
    Peaks(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for WaveCrate operations.
pub type Result<T> = std::result::Result<T, WaveCrateError>;
