//! Error types for the manager client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the process manager
///
/// All three variants are transport failures from the control plane's point
/// of view; the distinction is kept for diagnostics only.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network down, timeout, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Manager returned a non-success status code
    #[error("manager error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Detail string from the response body, or the status text
        message: String,
    },

    /// Failed to parse a response body
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
