//! Process DTOs: start parameters and command acknowledgements
//!
//! Parameters are opaque to the control plane beyond being forwarded
//! verbatim as query parameters; the manager fills in defaults for any
//! field left unset.

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobKind, JobMode};

/// Query parameters for a teleoperate start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeleoperateParams {
    pub display_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_top_camera_only: Option<bool>,
}

impl Default for TeleoperateParams {
    fn default() -> Self {
        Self {
            display_data: true,
            use_top_camera_only: None,
        }
    }
}

/// Query parameters for a record start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_time_s: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_to_hub: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_top_camera_only: Option<bool>,
}

/// Query parameters for a train start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_repo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
}

/// Query parameters for a replay start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

/// A start request for one of the four job kinds.
#[derive(Debug, Clone)]
pub enum JobRequest {
    Teleoperate(TeleoperateParams),
    Record(RecordParams),
    Train(TrainParams),
    Replay(ReplayParams),
}

impl JobRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::Teleoperate(_) => JobKind::Teleoperate,
            JobRequest::Record(_) => JobKind::Record,
            JobRequest::Train(_) => JobKind::Train,
            JobRequest::Replay(_) => JobKind::Replay,
        }
    }
}

/// Manager acknowledgement for a job start command.
///
/// `status` is carried verbatim; the manager's vocabulary is wider than the
/// happy path, and an acknowledged `"error"` is a distinct failure from a
/// transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartAck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<JobMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StartAck {
    pub fn is_started(&self) -> bool {
        self.status == "started"
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Manager acknowledgement for a job stop command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopAck {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_ack_wire_format() {
        let ack: StartAck =
            serde_json::from_str(r#"{"status": "started", "mode": "record"}"#).unwrap();
        assert!(ack.is_started());
        assert!(!ack.is_error());
        assert_eq!(ack.mode, Some(JobMode::Record));
        assert!(ack.message.is_none());

        let ack: StartAck =
            serde_json::from_str(r#"{"status": "error", "message": "spawn failed"}"#).unwrap();
        assert!(ack.is_error());
        assert_eq!(ack.message.as_deref(), Some("spawn failed"));
    }

    #[test]
    fn test_record_params_skip_unset_fields() {
        let params = RecordParams {
            repo_id: Some("lab/pick_place".to_string()),
            num_episodes: Some(5),
            ..Default::default()
        };

        let encoded = serde_urlencoded_like(&params);
        assert!(encoded.contains("repo_id"));
        assert!(encoded.contains("num_episodes"));
        assert!(!encoded.contains("single_task"));
        assert!(!encoded.contains("push_to_hub"));
    }

    // serde_json stands in for the query-string encoder: both honor
    // skip_serializing_if, which is what the assertion is about.
    fn serde_urlencoded_like(params: &RecordParams) -> String {
        serde_json::to_string(params).unwrap()
    }

    #[test]
    fn test_request_kind() {
        assert_eq!(
            JobRequest::Teleoperate(TeleoperateParams::default()).kind(),
            JobKind::Teleoperate
        );
        assert_eq!(
            JobRequest::Replay(ReplayParams::default()).kind(),
            JobKind::Replay
        );
    }
}
