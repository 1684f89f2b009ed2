//! Leader service domain types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Liveness of the remote leader service.
///
/// `Unknown` is the initial value and the value after any fetch failure.
/// It is deliberately distinct from `Stopped`: "we could not ask" is not
/// the same as "it told us it is down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderState {
    Running,
    Stopped,
    #[default]
    Unknown,
}

impl LeaderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderState::Running => "running",
            LeaderState::Stopped => "stopped",
            LeaderState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LeaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the leader service, as reported by the process manager.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeaderStatus {
    #[serde(rename = "status")]
    pub state: LeaderState,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        let status = LeaderStatus::default();
        assert_eq!(status.state, LeaderState::Unknown);
        assert!(status.host.is_none());
        assert!(status.port.is_none());
    }

    #[test]
    fn test_wire_format_uses_status_field() {
        let json = r#"{"status": "running", "host": "192.168.2.138", "port": 5555}"#;
        let status: LeaderStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.state, LeaderState::Running);
        assert_eq!(status.host.as_deref(), Some("192.168.2.138"));
        assert_eq!(status.port, Some(5555));
    }
}
