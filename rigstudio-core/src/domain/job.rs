//! Job domain types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four mutually exclusive long-running jobs the rig can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Teleoperate,
    Record,
    Train,
    Replay,
}

impl JobKind {
    /// Path segment used by the process manager's start endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Teleoperate => "teleoperate",
            JobKind::Record => "record",
            JobKind::Train => "train",
            JobKind::Replay => "replay",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode reported by the process manager: idle, or the active job kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobMode {
    #[default]
    Idle,
    Teleoperate,
    Record,
    Train,
    Replay,
}

impl JobMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobMode::Idle => "idle",
            JobMode::Teleoperate => "teleoperate",
            JobMode::Record => "record",
            JobMode::Train => "train",
            JobMode::Replay => "replay",
        }
    }

    /// The job kind this mode corresponds to, if any.
    pub fn kind(&self) -> Option<JobKind> {
        match self {
            JobMode::Idle => None,
            JobMode::Teleoperate => Some(JobKind::Teleoperate),
            JobMode::Record => Some(JobKind::Record),
            JobMode::Train => Some(JobKind::Train),
            JobMode::Replay => Some(JobKind::Replay),
        }
    }
}

impl From<JobKind> for JobMode {
    fn from(kind: JobKind) -> Self {
        match kind {
            JobKind::Teleoperate => JobMode::Teleoperate,
            JobKind::Record => JobMode::Record,
            JobKind::Train => JobMode::Train,
            JobKind::Replay => JobMode::Replay,
        }
    }
}

impl fmt::Display for JobMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the single active job, as reported by the process manager.
///
/// Invariants on manager-reported snapshots: `running == false` iff
/// `mode == idle`, and `pid` is present iff `running`. An optimistic
/// interim snapshot (between a command acknowledgement and the next poll)
/// may carry `running == true` with no pid yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobStatus {
    pub mode: JobMode,
    pub running: bool,
    pub pid: Option<u32>,
    #[serde(default)]
    pub logs: Vec<String>,
    pub error: Option<String>,
}

/// Transient marker for a command that was acknowledged by the manager but
/// not yet confirmed by a poll. Cleared unconditionally by the next
/// successful job poll, never accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub kind: CommandKind,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

/// What the pending command was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Start(JobKind),
    Stop,
}

impl PendingCommand {
    pub fn start(kind: JobKind) -> Self {
        Self {
            kind: CommandKind::Start(kind),
            issued_at: chrono::Utc::now(),
        }
    }

    pub fn stop() -> Self {
        Self {
            kind: CommandKind::Stop,
            issued_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_idle() {
        let status = JobStatus::default();
        assert_eq!(status.mode, JobMode::Idle);
        assert!(!status.running);
        assert!(status.pid.is_none());
        assert!(status.logs.is_empty());
        assert!(status.error.is_none());
    }

    #[test]
    fn test_status_wire_format() {
        let json = r#"{
            "mode": "teleoperate",
            "running": true,
            "pid": 4242,
            "logs": ["[Studio] Process started.", "connecting to follower"],
            "error": null
        }"#;

        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.mode, JobMode::Teleoperate);
        assert!(status.running);
        assert_eq!(status.pid, Some(4242));
        assert_eq!(status.logs.len(), 2);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_mode_round_trip() {
        for kind in [
            JobKind::Teleoperate,
            JobKind::Record,
            JobKind::Train,
            JobKind::Replay,
        ] {
            let mode = JobMode::from(kind);
            assert_eq!(mode.kind(), Some(kind));
            assert_eq!(mode.as_str(), kind.as_str());
        }
        assert_eq!(JobMode::Idle.kind(), None);
    }
}
