//! Polling scheduler
//!
//! Drives the status store on two timers. The job timer alternates between
//! a fast and a slow period depending on whether a job is running,
//! re-evaluated after every tick so a change in `running` takes effect
//! immediately. The leader timer runs at a fixed period, and only while the
//! remote leader is enabled.
//!
//! Overlap protection lives in the store: a tick that would land while the
//! previous refresh for the same target is still outstanding is dropped,
//! not queued.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use crate::config::Config;
use crate::store::StatusStore;

pub struct PollingScheduler {
    store: Arc<StatusStore>,
    config: Config,
    job_task: Mutex<Option<JoinHandle<()>>>,
    leader_task: Mutex<Option<JoinHandle<()>>>,
}

impl PollingScheduler {
    pub fn new(store: Arc<StatusStore>, config: Config) -> Self {
        Self {
            store,
            config,
            job_task: Mutex::new(None),
            leader_task: Mutex::new(None),
        }
    }

    /// Start the job timer, and the leader timer when the remote leader is
    /// enabled. Idempotent: timers that are already running are left alone.
    pub fn start(&self) {
        self.start_job_polling();
        if self.store.remote_leader_enabled() {
            self.start_leader_polling();
        }
    }

    pub fn start_job_polling(&self) {
        let mut slot = self.job_task.lock().unwrap();
        if slot.is_some() {
            return;
        }

        let store = Arc::clone(&self.store);
        let fast = self.config.fast_poll;
        let slow = self.config.slow_poll;

        *slot = Some(tokio::spawn(async move {
            loop {
                let period = if store.job().running { fast } else { slow };
                time::sleep(period).await;
                debug!("polling job status");
                store.refresh_job().await;
            }
        }));
    }

    pub fn start_leader_polling(&self) {
        let mut slot = self.leader_task.lock().unwrap();
        if slot.is_some() {
            return;
        }

        let store = Arc::clone(&self.store);
        let period = self.config.leader_poll;

        *slot = Some(tokio::spawn(async move {
            loop {
                time::sleep(period).await;
                debug!("polling leader status");
                store.refresh_leader().await;
            }
        }));
    }

    /// Cancel the leader timer. Safe to call when it is not running.
    pub fn stop_leader_polling(&self) {
        if let Some(task) = self.leader_task.lock().unwrap().take() {
            task.abort();
        }
    }

    /// Cancel all timers. No refresh fires after this returns.
    pub fn stop(&self) {
        if let Some(task) = self.job_task.lock().unwrap().take() {
            task.abort();
        }
        self.stop_leader_polling();
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
