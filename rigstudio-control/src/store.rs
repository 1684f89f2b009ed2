//! Status store
//!
//! Holds the last known job and leader-service snapshots and refreshes them
//! from the process manager. Poll results are the source of truth: a
//! successful job poll replaces the whole snapshot and clears any pending
//! command marker, never merging partial fields.
//!
//! The two targets fail differently on transport errors. A job-status blip
//! keeps the previous snapshot (a poll failure is not job truth, and
//! `error` is reserved for job-reported failures); a missed leader
//! heartbeat resets the leader snapshot to `unknown`, because the absence
//! of an answer is itself meaningful there.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rigstudio_client::api::ManagerApi;
use rigstudio_core::domain::job::{CommandKind, JobMode, JobStatus, PendingCommand};
use rigstudio_core::domain::leader::LeaderStatus;
use tracing::{debug, warn};

/// Outcome of a refresh call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced with a fresh fetch
    Updated,
    /// A refresh for the same target was still in flight; this one was dropped
    Skipped,
    /// Transport failure; snapshot handled per target policy
    Failed,
}

/// Cached state of the active job and the leader service.
pub struct StatusStore {
    api: Arc<dyn ManagerApi>,
    job: Mutex<JobStatus>,
    leader: Mutex<LeaderStatus>,
    pending: Mutex<Option<PendingCommand>>,
    remote_leader: AtomicBool,
    // Per-target in-flight guards. try_lock drops overlapping refreshes
    // instead of queueing them, so a slow manager never builds a backlog.
    job_refresh: tokio::sync::Mutex<()>,
    leader_refresh: tokio::sync::Mutex<()>,
}

impl StatusStore {
    pub fn new(api: Arc<dyn ManagerApi>, remote_leader: bool) -> Self {
        Self {
            api,
            job: Mutex::new(JobStatus::default()),
            leader: Mutex::new(LeaderStatus::default()),
            pending: Mutex::new(None),
            remote_leader: AtomicBool::new(remote_leader),
            job_refresh: tokio::sync::Mutex::new(()),
            leader_refresh: tokio::sync::Mutex::new(()),
        }
    }

    /// Last polled job snapshot.
    pub fn job(&self) -> JobStatus {
        self.job.lock().unwrap().clone()
    }

    /// Job snapshot adjusted for a command awaiting poll confirmation.
    ///
    /// A pending start shows the target mode as running (pid not yet
    /// known); a pending stop shows idle. Log lines are carried over from
    /// the last poll either way.
    pub fn effective_job(&self) -> JobStatus {
        let snapshot = self.job();
        match *self.pending.lock().unwrap() {
            Some(PendingCommand {
                kind: CommandKind::Start(kind),
                ..
            }) => JobStatus {
                mode: kind.into(),
                running: true,
                pid: None,
                logs: snapshot.logs,
                error: None,
            },
            Some(PendingCommand {
                kind: CommandKind::Stop,
                ..
            }) => JobStatus {
                mode: JobMode::Idle,
                running: false,
                pid: None,
                logs: snapshot.logs,
                error: snapshot.error,
            },
            None => snapshot,
        }
    }

    /// Last polled leader snapshot.
    pub fn leader(&self) -> LeaderStatus {
        self.leader.lock().unwrap().clone()
    }

    pub fn remote_leader_enabled(&self) -> bool {
        self.remote_leader.load(Ordering::Acquire)
    }

    pub fn set_remote_leader(&self, enabled: bool) {
        self.remote_leader.store(enabled, Ordering::Release);
    }

    /// Record a command the manager acknowledged. Cleared by the next
    /// successful job poll.
    pub fn note_pending(&self, cmd: PendingCommand) {
        *self.pending.lock().unwrap() = Some(cmd);
    }

    /// Forget the cached leader state entirely.
    pub fn reset_leader_unknown(&self) {
        *self.leader.lock().unwrap() = LeaderStatus::default();
    }

    /// Fetch a fresh job snapshot from the manager.
    pub async fn refresh_job(&self) -> RefreshOutcome {
        let Ok(_guard) = self.job_refresh.try_lock() else {
            debug!("job refresh already in flight, dropping");
            return RefreshOutcome::Skipped;
        };

        match self.api.job_status().await {
            Ok(status) => {
                *self.job.lock().unwrap() = status;
                *self.pending.lock().unwrap() = None;
                RefreshOutcome::Updated
            }
            Err(e) => {
                // Keep the previous snapshot; the manager may just be slow.
                warn!("job status refresh failed: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetch a fresh leader snapshot from the manager.
    pub async fn refresh_leader(&self) -> RefreshOutcome {
        let Ok(_guard) = self.leader_refresh.try_lock() else {
            debug!("leader refresh already in flight, dropping");
            return RefreshOutcome::Skipped;
        };

        match self.api.leader_status().await {
            Ok(status) => {
                *self.leader.lock().unwrap() = status;
                RefreshOutcome::Updated
            }
            Err(e) => {
                warn!("leader status refresh failed: {}", e);
                *self.leader.lock().unwrap() = LeaderStatus::default();
                RefreshOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use rigstudio_client::error::{ClientError, Result as ClientResult};
    use rigstudio_core::domain::job::JobKind;
    use rigstudio_core::domain::leader::LeaderState;
    use rigstudio_core::dto::leader::LeaderAck;
    use rigstudio_core::dto::process::{JobRequest, StartAck, StopAck};

    /// Manager stub serving canned snapshots, with per-target failure toggles.
    #[derive(Default)]
    struct StubManager {
        job: Mutex<JobStatus>,
        leader: Mutex<LeaderStatus>,
        fail_job: AtomicBool,
        fail_leader: AtomicBool,
        delay: Mutex<Option<std::time::Duration>>,
    }

    #[async_trait]
    impl ManagerApi for StubManager {
        async fn job_status(&self) -> ClientResult<JobStatus> {
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_job.load(Ordering::Acquire) {
                return Err(ClientError::api_error(502, "connection refused"));
            }
            Ok(self.job.lock().unwrap().clone())
        }

        async fn start_job(&self, _req: &JobRequest) -> ClientResult<StartAck> {
            unreachable!("store tests never start jobs")
        }

        async fn stop_job(&self) -> ClientResult<StopAck> {
            unreachable!("store tests never stop jobs")
        }

        async fn leader_status(&self) -> ClientResult<LeaderStatus> {
            if self.fail_leader.load(Ordering::Acquire) {
                return Err(ClientError::api_error(502, "connection refused"));
            }
            Ok(self.leader.lock().unwrap().clone())
        }

        async fn start_leader(&self) -> ClientResult<LeaderAck> {
            unreachable!("store tests never start the leader")
        }

        async fn stop_leader(&self) -> ClientResult<LeaderAck> {
            unreachable!("store tests never stop the leader")
        }
    }

    fn running_status(kind: JobKind) -> JobStatus {
        JobStatus {
            mode: kind.into(),
            running: true,
            pid: Some(4242),
            logs: vec!["spawned".to_string()],
            error: None,
        }
    }

    #[tokio::test]
    async fn test_job_failure_retains_previous_snapshot() {
        let manager = Arc::new(StubManager::default());
        *manager.job.lock().unwrap() = running_status(JobKind::Record);

        let store = StatusStore::new(Arc::clone(&manager) as Arc<dyn ManagerApi>, false);
        assert_eq!(store.refresh_job().await, RefreshOutcome::Updated);
        let before = store.job();
        assert!(before.running);

        manager.fail_job.store(true, Ordering::Release);
        assert_eq!(store.refresh_job().await, RefreshOutcome::Failed);
        let after = store.job();
        assert_eq!(before, after, "transport failure must not reset the job");
        assert!(after.error.is_none(), "polling failures never set error");
    }

    #[tokio::test]
    async fn test_leader_failure_resets_to_unknown() {
        let manager = Arc::new(StubManager::default());
        *manager.leader.lock().unwrap() = LeaderStatus {
            state: LeaderState::Running,
            host: Some("192.168.2.138".to_string()),
            port: Some(5555),
        };

        let store = StatusStore::new(Arc::clone(&manager) as Arc<dyn ManagerApi>, true);
        store.refresh_leader().await;
        assert_eq!(store.leader().state, LeaderState::Running);

        manager.fail_leader.store(true, Ordering::Release);
        assert_eq!(store.refresh_leader().await, RefreshOutcome::Failed);
        let leader = store.leader();
        assert_eq!(leader.state, LeaderState::Unknown);
        assert!(leader.host.is_none());
    }

    #[tokio::test]
    async fn test_pending_adjusts_view_and_poll_clears_it() {
        let manager = Arc::new(StubManager::default());
        let store = StatusStore::new(Arc::clone(&manager) as Arc<dyn ManagerApi>, false);

        store.note_pending(PendingCommand::start(JobKind::Teleoperate));
        let optimistic = store.effective_job();
        assert_eq!(optimistic.mode, JobMode::Teleoperate);
        assert!(optimistic.running);
        assert!(optimistic.pid.is_none());

        // Poll truth wins and clears the marker wholesale.
        *manager.job.lock().unwrap() = running_status(JobKind::Teleoperate);
        store.refresh_job().await;
        let confirmed = store.effective_job();
        assert_eq!(confirmed.pid, Some(4242));
        assert_eq!(confirmed, store.job());
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_dropped_not_queued() {
        let manager = Arc::new(StubManager::default());
        *manager.delay.lock().unwrap() = Some(std::time::Duration::from_millis(50));

        let store = Arc::new(StatusStore::new(
            Arc::clone(&manager) as Arc<dyn ManagerApi>,
            false,
        ));

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.refresh_job().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(store.refresh_job().await, RefreshOutcome::Skipped);
        assert_eq!(first.await.unwrap(), RefreshOutcome::Updated);
    }

    #[tokio::test]
    async fn test_repeated_refresh_is_idempotent() {
        let manager = Arc::new(StubManager::default());
        *manager.job.lock().unwrap() = running_status(JobKind::Train);

        let store = StatusStore::new(Arc::clone(&manager) as Arc<dyn ManagerApi>, false);
        store.refresh_job().await;
        let first = store.job();
        store.refresh_job().await;
        let second = store.job();
        assert_eq!(first, second);
    }
}
