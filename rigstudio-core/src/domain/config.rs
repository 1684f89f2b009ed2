//! Rig configuration
//!
//! Fetched read-only from the process manager's config endpoint. The
//! control plane only consumes `robot.remote_leader*` to decide whether the
//! leader service matters at all; the per-job sections carry the defaults
//! the manager applies when a start request omits a parameter. Persistence
//! is entirely the manager's concern.

use serde::{Deserialize, Serialize};

/// Full rig configuration as served by the manager.
///
/// Unknown sections (cameras, paths, ...) are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub robot: RobotConfig,
    pub dataset: DatasetConfig,
    pub train: TrainConfig,
    pub replay: ReplayConfig,
}

/// Robot and leader-link configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Leader arm IP address
    pub leader_ip: String,
    /// Follower arm IP address
    pub follower_ip: String,
    /// Leader runs on a separate PC reachable through the leader service
    pub remote_leader: bool,
    /// Host of the PC running the leader service
    pub remote_leader_host: String,
    /// TCP port of the leader service
    pub remote_leader_port: u16,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            leader_ip: "192.168.1.2".to_string(),
            follower_ip: "192.168.1.5".to_string(),
            remote_leader: false,
            remote_leader_host: "192.168.2.138".to_string(),
            remote_leader_port: 5555,
        }
    }
}

/// Dataset recording defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub repo_id: String,
    pub num_episodes: u32,
    pub episode_time_s: u32,
    pub reset_time_s: u32,
    pub single_task: String,
    pub push_to_hub: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            repo_id: "rigstudio/test_dataset".to_string(),
            num_episodes: 10,
            episode_time_s: 45,
            reset_time_s: 15,
            single_task: "Grab the cube".to_string(),
            push_to_hub: false,
        }
    }
}

/// Training defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub dataset_repo_id: String,
    pub policy_type: String,
    pub output_dir: String,
    pub job_name: String,
    pub policy_repo_id: String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_repo_id: "rigstudio/test_dataset".to_string(),
            policy_type: "act".to_string(),
            output_dir: "outputs/train/act_rig".to_string(),
            job_name: "act_rig".to_string(),
            policy_repo_id: "rigstudio/my_policy".to_string(),
        }
    }
}

/// Replay defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub repo_id: String,
    pub episode: u32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            repo_id: "rigstudio/test_dataset".to_string(),
            episode: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sections_ignored() {
        let json = r#"{
            "robot": {
                "remote_leader": true,
                "remote_leader_host": "10.0.0.7",
                "remote_leader_port": 6000,
                "cameras": {"top": {"type": "intelrealsense"}}
            },
            "lerobot_path": "/home/rig/lerobot"
        }"#;

        let cfg: RigConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.robot.remote_leader);
        assert_eq!(cfg.robot.remote_leader_host, "10.0.0.7");
        assert_eq!(cfg.robot.remote_leader_port, 6000);
        // Untouched sections fall back to defaults
        assert_eq!(cfg.replay.episode, 0);
    }
}
