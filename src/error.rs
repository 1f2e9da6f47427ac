//! Error types for catalogue operations.

use thiserror::Error;

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalogue errors.
///
/// Only the fetch boundary, the submission forms and the favorites store
/// produce these; extraction, filtering and pagination never fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-2xx response from the backend
    #[error("API Error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// Requested entity does not exist
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Connection failure, timeout, TLS error
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Form payload rejected before it was sent
    #[error("{0}")]
    Validation(String),

    /// Favorites store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}
