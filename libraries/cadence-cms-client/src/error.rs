//! Error types for the CMS client.

use thiserror::Error;

/// Errors that can occur when talking to the CMS.
#[derive(Error, Debug)]
pub enum CmsClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// CMS returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse CMS response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// CMS is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<CmsClientError> for cadence_core::CadenceError {
    fn from(err: CmsClientError) -> Self {
        cadence_core::CadenceError::network(err.to_string())
    }
}

/// Result type for CMS client operations.
pub type Result<T> = std::result::Result<T, CmsClientError>;
