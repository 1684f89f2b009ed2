//! Rig configuration endpoint (read-only)

use rigstudio_core::domain::config::RigConfig;

use crate::ManagerClient;
use crate::error::Result;

impl ManagerClient {
    /// Fetch the rig configuration
    ///
    /// The control plane reads `robot.remote_leader*` from this; everything
    /// else is display material. Saving config is the dashboard's settings
    /// panel talking to the manager directly and is not modeled here.
    pub async fn rig_config(&self) -> Result<RigConfig> {
        let url = format!("{}/api/config", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
