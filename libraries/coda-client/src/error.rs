//! Error types for the Coda API client.

use thiserror::Error;

/// Errors that can occur when talking to the Coda API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an HTTP error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// HTTP succeeded but the response envelope carried a non-200 status
    #[error("API status {0}")]
    ApiStatus(u16),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
