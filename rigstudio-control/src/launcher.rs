//! Job launcher
//!
//! Validates start and stop requests against the cached snapshots, forwards
//! them to the process manager, and kicks an immediate out-of-band refresh
//! so the next view reflects the acknowledged state without waiting for the
//! scheduler tick.

use std::sync::Arc;

use rigstudio_client::api::ManagerApi;
use rigstudio_core::domain::job::PendingCommand;
use rigstudio_core::domain::leader::LeaderState;
use rigstudio_core::dto::leader::LeaderAck;
use rigstudio_core::dto::process::{JobRequest, StartAck, StopAck};
use tracing::{info, warn};

use crate::error::{ControlError, Result};
use crate::gate;
use crate::store::StatusStore;

pub struct JobLauncher {
    api: Arc<dyn ManagerApi>,
    store: Arc<StatusStore>,
}

impl JobLauncher {
    pub fn new(api: Arc<dyn ManagerApi>, store: Arc<StatusStore>) -> Self {
        Self { api, store }
    }

    /// Start a job.
    ///
    /// Local validation runs first and issues no network request:
    /// `Conflict` when a job is already running, `DependencyNotReady` when
    /// the gate is closed for a leader-bound kind. A forwarded start may
    /// still come back acknowledged-but-rejected (`RemoteRejected`).
    pub async fn start(&self, req: JobRequest) -> Result<StartAck> {
        let kind = req.kind();

        if self.store.effective_job().running {
            return Err(ControlError::Conflict);
        }

        let gate_state = gate::evaluate(
            self.store.remote_leader_enabled(),
            self.store.leader().state,
        );
        if !gate::permits(gate_state, kind) {
            return Err(ControlError::DependencyNotReady);
        }

        let ack = self.api.start_job(&req).await?;
        if ack.is_error() {
            let detail = ack
                .message
                .clone()
                .unwrap_or_else(|| "start rejected".to_string());
            warn!("manager rejected {} start: {}", kind, detail);
            return Err(ControlError::RemoteRejected(detail));
        }

        info!("{} start acknowledged: {}", kind, ack.status);
        self.store.note_pending(PendingCommand::start(kind));
        self.store.refresh_job().await;
        Ok(ack)
    }

    /// Stop the active job.
    ///
    /// Forwarded unconditionally: with nothing running the manager
    /// acknowledges a no-op, and stop must always be safe to retry. There
    /// is deliberately no client-side "is anything running" check here.
    pub async fn stop(&self) -> Result<StopAck> {
        let ack = self.api.stop_job().await?;
        info!("stop acknowledged: {}", ack.status);
        self.store.note_pending(PendingCommand::stop());
        self.store.refresh_job().await;
        Ok(ack)
    }

    /// Toggle the leader service.
    ///
    /// When the leader is running, any active job is stopped before the
    /// leader teardown is issued. The reverse order would pull the link out
    /// from under a job that assumes it is alive.
    pub async fn toggle_leader(&self) -> Result<LeaderAck> {
        if self.store.leader().state == LeaderState::Running {
            if self.store.effective_job().running {
                let ack = self.api.stop_job().await?;
                info!("stopped active job before leader teardown: {}", ack.status);
                self.store.note_pending(PendingCommand::stop());
            }

            let ack = self.api.stop_leader().await?;
            if ack.is_error() {
                let detail = ack
                    .message
                    .clone()
                    .unwrap_or_else(|| "leader stop rejected".to_string());
                warn!("manager rejected leader stop: {}", detail);
                return Err(ControlError::RemoteRejected(detail));
            }

            info!("leader stop acknowledged: {}", ack.status);
            self.store.refresh_job().await;
            self.store.refresh_leader().await;
            Ok(ack)
        } else {
            let ack = self.api.start_leader().await?;
            if ack.is_error() {
                // The cached leader state is left to the next poll rather
                // than assumed stopped.
                let detail = ack
                    .message
                    .clone()
                    .unwrap_or_else(|| "leader start rejected".to_string());
                warn!("manager rejected leader start: {}", detail);
                return Err(ControlError::RemoteRejected(detail));
            }

            info!("leader start acknowledged: {}", ack.status);
            self.store.refresh_leader().await;
            Ok(ack)
        }
    }
}
