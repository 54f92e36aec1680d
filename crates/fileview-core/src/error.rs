//! Error types for fileview-core

use thiserror::Error;

/// Result type alias using fileview-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fileview-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The query service rejected a request or timed out
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Attachment not present in the visible list
    #[error("Attachment not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
