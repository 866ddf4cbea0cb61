//! Client error types

use shared::ModelError;
use thiserror::Error;

use crate::store::local::StorageError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a 5xx or an unexpected status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload rejected by the server (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payload rejected before it left the client
    #[error("Invalid input: {0}")]
    Model(#[from] ModelError),

    /// Local store read/write failure
    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Spreadsheet writer failure
    #[error("Export error: {0}")]
    Export(String),
}

impl ClientError {
    /// Failures that say nothing about the payload itself; these are the
    /// ones the data access layer redirects to the local store.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Server { .. } | Self::InvalidResponse(_)
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
