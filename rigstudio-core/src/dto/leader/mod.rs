//! Leader service DTOs

use serde::{Deserialize, Serialize};

/// Manager acknowledgement for a leader service start or stop command.
///
/// Possible `status` values observed from the manager: `started`,
/// `already_running`, `stopped`, `not_running`, `force_killed`, `error`.
/// Only `error` is a rejection; the rest acknowledge the requested end
/// state one way or another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderAck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
}

impl LeaderAck {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Recent log lines from the leader service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderLogs {
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
