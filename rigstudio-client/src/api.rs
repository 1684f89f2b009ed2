//! Transport seam between the control plane and the process manager
//!
//! The control plane depends on this trait rather than on [`ManagerClient`]
//! directly, so tests can drive the full lifecycle against an in-memory
//! manager with no network involved.

use async_trait::async_trait;

use rigstudio_core::domain::job::JobStatus;
use rigstudio_core::domain::leader::LeaderStatus;
use rigstudio_core::dto::leader::LeaderAck;
use rigstudio_core::dto::process::{JobRequest, StartAck, StopAck};

use crate::ManagerClient;
use crate::error::Result;

/// Operations the control plane needs from the process manager.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the client can be shared
/// between the polling timers and user-issued commands.
#[async_trait]
pub trait ManagerApi: Send + Sync {
    /// Fetch the current job status snapshot
    async fn job_status(&self) -> Result<JobStatus>;

    /// Forward a job start command
    async fn start_job(&self, req: &JobRequest) -> Result<StartAck>;

    /// Forward a job stop command
    async fn stop_job(&self) -> Result<StopAck>;

    /// Fetch the current leader service status snapshot
    async fn leader_status(&self) -> Result<LeaderStatus>;

    /// Forward a leader service start command
    async fn start_leader(&self) -> Result<LeaderAck>;

    /// Forward a leader service stop command
    async fn stop_leader(&self) -> Result<LeaderAck>;
}

#[async_trait]
impl ManagerApi for ManagerClient {
    async fn job_status(&self) -> Result<JobStatus> {
        self.process_status().await
    }

    async fn start_job(&self, req: &JobRequest) -> Result<StartAck> {
        self.start_process(req).await
    }

    async fn stop_job(&self) -> Result<StopAck> {
        self.stop_process().await
    }

    async fn leader_status(&self) -> Result<LeaderStatus> {
        self.leader_service_status().await
    }

    async fn start_leader(&self) -> Result<LeaderAck> {
        self.start_leader_service().await
    }

    async fn stop_leader(&self) -> Result<LeaderAck> {
        self.stop_leader_service().await
    }
}
