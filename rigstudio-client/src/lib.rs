//! Rigstudio HTTP Client
//!
//! A typed HTTP client for the rig's external process manager API.
//!
//! The manager owns the actual subprocesses (teleoperation, recording,
//! training, replay) and the remote leader service; this crate only speaks
//! its JSON request/response contract. The [`api::ManagerApi`] trait is the
//! seam the control plane consumes, so tests can substitute an in-memory
//! manager.
//!
//! # Example
//!
//! ```no_run
//! use rigstudio_client::ManagerClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ManagerClient::new("http://localhost:8000");
//!
//!     let status = client.process_status().await?;
//!     println!("mode: {} (running: {})", status.mode, status.running);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod leader;
mod process;
mod settings;

// Re-export commonly used types
pub use api::ManagerApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the process manager API
///
/// Provides methods for all manager endpoints the dashboard core uses:
/// - Job lifecycle (status, start, stop)
/// - Leader service lifecycle (status, start, stop, logs)
/// - Rig configuration (read-only fetch)
#[derive(Debug, Clone)]
pub struct ManagerClient {
    /// Base URL of the manager (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ManagerClient {
    /// Create a new manager client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the manager API (e.g., "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new manager client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc. Every
    /// fetch inherits the client's timeout; a timed-out request surfaces as
    /// any other transport failure.
    ///
    /// # Example
    /// ```
    /// use rigstudio_client::ManagerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ManagerClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the manager
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handling
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become an [`ClientError::ApiError`] carrying the
    /// body's `detail` field when present, else the body text, else the
    /// canonical status reason. This is the sole error channel with the
    /// manager.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(status, &body);
            tracing::debug!("manager request failed with status {}: {}", status, detail);
            return Err(ClientError::api_error(status.as_u16(), detail));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("failed to parse JSON response: {}", e)))
    }
}

/// Extract a human-readable detail string from an error response body.
fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
