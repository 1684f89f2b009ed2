//! Orchestration facade
//!
//! Single entry point for the UI layer. Composes the store, gate, launcher
//! and scheduler, and serializes mutating commands through a depth-1 gate:
//! a command arriving while another is in flight is rejected with `Busy`.
//! Polls are never suppressed; they always win for displayed truth, while
//! commands only set an optimistic interim value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rigstudio_client::api::ManagerApi;
use rigstudio_core::domain::job::JobStatus;
use rigstudio_core::domain::leader::LeaderStatus;
use rigstudio_core::dto::leader::LeaderAck;
use rigstudio_core::dto::process::{JobRequest, StartAck, StopAck};

use crate::config::Config;
use crate::error::{ControlError, Result};
use crate::gate::{self, GateState};
use crate::launcher::JobLauncher;
use crate::scheduler::PollingScheduler;
use crate::store::StatusStore;

/// Read view assembled for the UI layer.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Pending-adjusted job snapshot
    pub job: JobStatus,
    /// Cached leader snapshot
    pub leader: LeaderStatus,
    /// Current gate decision
    pub gate: GateState,
    /// Whether a command is in flight
    pub busy: bool,
}

/// The control plane the UI layer talks to.
///
/// This is the only caller of [`JobLauncher`]'s mutating operations.
pub struct ControlPlane {
    store: Arc<StatusStore>,
    launcher: JobLauncher,
    scheduler: PollingScheduler,
    busy: AtomicBool,
    command_gate: tokio::sync::Mutex<()>,
}

impl ControlPlane {
    /// Build a control plane over `api`.
    ///
    /// `remote_leader` comes from the rig configuration and decides whether
    /// the leader service is polled at all.
    pub fn new(api: Arc<dyn ManagerApi>, config: Config, remote_leader: bool) -> Self {
        let store = Arc::new(StatusStore::new(Arc::clone(&api), remote_leader));
        let launcher = JobLauncher::new(api, Arc::clone(&store));
        let scheduler = PollingScheduler::new(Arc::clone(&store), config);
        Self {
            store,
            launcher,
            scheduler,
            busy: AtomicBool::new(false),
            command_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Prime the snapshots with one immediate fetch per enabled target.
    pub async fn prime(&self) {
        self.store.refresh_job().await;
        if self.store.remote_leader_enabled() {
            self.store.refresh_leader().await;
        }
    }

    /// Prime the snapshots and start the polling timers.
    pub async fn start(&self) {
        self.prime().await;
        self.scheduler.start();
    }

    /// Current view state.
    pub fn view(&self) -> ViewState {
        let job = self.store.effective_job();
        let leader = self.store.leader();
        let gate = gate::evaluate(self.store.remote_leader_enabled(), leader.state);
        ViewState {
            job,
            leader,
            gate,
            busy: self.busy.load(Ordering::Acquire),
        }
    }

    /// Start a job. Rejects with `Busy` while another command is in flight.
    pub async fn start_job(&self, req: JobRequest) -> Result<StartAck> {
        let _slot = self.claim_command_slot()?;
        self.launcher.start(req).await
    }

    /// Stop the active job. Rejects with `Busy` while another command is in
    /// flight; otherwise always forwarded.
    pub async fn stop_job(&self) -> Result<StopAck> {
        let _slot = self.claim_command_slot()?;
        self.launcher.stop().await
    }

    /// Toggle the leader service. Rejects with `Busy` while another command
    /// is in flight.
    pub async fn toggle_leader(&self) -> Result<LeaderAck> {
        let _slot = self.claim_command_slot()?;
        self.launcher.toggle_leader().await
    }

    /// Enable or disable the remote leader.
    ///
    /// Disabling cancels the leader timer immediately and resets the cached
    /// leader state to unknown; enabling starts the timer.
    pub fn set_remote_leader(&self, enabled: bool) {
        self.store.set_remote_leader(enabled);
        if enabled {
            self.scheduler.start_leader_polling();
        } else {
            self.scheduler.stop_leader_polling();
            self.store.reset_leader_unknown();
        }
    }

    /// Stop all polling timers. No timer callback fires after this returns.
    pub fn shutdown(&self) {
        self.scheduler.stop();
    }

    fn claim_command_slot(&self) -> Result<CommandSlot<'_>> {
        let guard = self
            .command_gate
            .try_lock()
            .map_err(|_| ControlError::Busy)?;
        self.busy.store(true, Ordering::Release);
        Ok(CommandSlot {
            _guard: guard,
            busy: &self.busy,
        })
    }
}

/// Depth-1 command slot; releasing it clears the busy flag.
struct CommandSlot<'a> {
    _guard: tokio::sync::MutexGuard<'a, ()>,
    busy: &'a AtomicBool,
}

impl Drop for CommandSlot<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
