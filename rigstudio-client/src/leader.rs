//! Leader service endpoints
//!
//! The leader service is an independently managed remote process; the
//! manager proxies its lifecycle. Start can take several seconds (the
//! manager verifies the service came up before acknowledging).

use rigstudio_core::domain::leader::LeaderStatus;
use rigstudio_core::dto::leader::{LeaderAck, LeaderLogs};

use crate::ManagerClient;
use crate::error::Result;

impl ManagerClient {
    /// Check whether the leader service is running
    pub async fn leader_service_status(&self) -> Result<LeaderStatus> {
        let url = format!("{}/api/leader-service/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Start the leader service
    pub async fn start_leader_service(&self) -> Result<LeaderAck> {
        let url = format!("{}/api/leader-service/start", self.base_url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Stop the leader service
    pub async fn stop_leader_service(&self) -> Result<LeaderAck> {
        let url = format!("{}/api/leader-service/stop", self.base_url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch recent log lines from the leader service
    ///
    /// # Arguments
    /// * `lines` - How many trailing lines to fetch; manager default when `None`
    pub async fn leader_service_logs(&self, lines: Option<usize>) -> Result<LeaderLogs> {
        let url = format!("{}/api/leader-service/logs", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(lines) = lines {
            request = request.query(&[("lines", lines)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
