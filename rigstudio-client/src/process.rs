//! Process lifecycle endpoints

use rigstudio_core::domain::job::JobStatus;
use rigstudio_core::dto::process::{JobRequest, StartAck, StopAck};

use crate::ManagerClient;
use crate::error::Result;

impl ManagerClient {
    /// Get the current job status and recent log lines
    ///
    /// The manager appends log output per poll; insertion order is
    /// meaningful and preserved.
    pub async fn process_status(&self) -> Result<JobStatus> {
        let url = format!("{}/api/process/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Start a job of the given kind
    ///
    /// Parameters are forwarded verbatim as query parameters; fields left
    /// unset fall back to the manager's configured defaults. The returned
    /// acknowledgement may itself report `status: "error"`.
    pub async fn start_process(&self, req: &JobRequest) -> Result<StartAck> {
        let url = format!("{}/api/{}/start", self.base_url, req.kind());
        let request = self.client.post(&url);
        let request = match req {
            JobRequest::Teleoperate(params) => request.query(params),
            JobRequest::Record(params) => request.query(params),
            JobRequest::Train(params) => request.query(params),
            JobRequest::Replay(params) => request.query(params),
        };
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Stop whatever job is running
    ///
    /// With nothing running this is a no-op acknowledged by the manager,
    /// not an error; stop is always safe to retry.
    pub async fn stop_process(&self) -> Result<StopAck> {
        let url = format!("{}/api/process/stop", self.base_url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }
}
