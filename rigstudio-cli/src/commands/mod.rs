//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod leader;

pub use job::StartCommands;
pub use leader::LeaderCommands;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use rigstudio_client::{ManagerApi, ManagerClient};
use rigstudio_control::ControlPlane;
use rigstudio_core::domain::config::RigConfig;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show current job and leader status
    Status {
        /// Also print the last N process log lines
        #[arg(long, value_name = "N")]
        logs: Option<usize>,
    },
    /// Start a job
    Start {
        #[command(subcommand)]
        command: StartCommands,
    },
    /// Stop the active job
    Stop,
    /// Leader service management
    Leader {
        #[command(subcommand)]
        command: LeaderCommands,
    },
    /// Print the rig configuration as JSON
    Config,
    /// Poll and print status continuously until Ctrl-C
    Watch,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Status { logs } => job::status(config, logs).await,
        Commands::Start { command } => job::handle_start_command(command, config).await,
        Commands::Stop => job::stop(config).await,
        Commands::Leader { command } => leader::handle_leader_command(command, config).await,
        Commands::Config => job::show_config(config).await,
        Commands::Watch => job::watch(config).await,
    }
}

/// Build the manager client with a bounded request timeout.
pub(crate) fn manager_client(config: &Config) -> Result<Arc<ManagerClient>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;
    Ok(Arc::new(ManagerClient::with_client(
        &config.manager_url,
        http_client,
    )))
}

/// Fetch the rig configuration, falling back to defaults when the manager
/// has none to offer.
pub(crate) async fn fetch_rig_config(client: &ManagerClient) -> RigConfig {
    match client.rig_config().await {
        Ok(rig) => rig,
        Err(e) => {
            println!(
                "{}",
                format!("⚠ could not fetch rig config ({e}), using defaults").yellow()
            );
            RigConfig::default()
        }
    }
}

/// Build a control plane over the shared manager client.
pub(crate) fn control_plane(
    config: &Config,
    client: Arc<ManagerClient>,
    remote_leader: bool,
) -> ControlPlane {
    ControlPlane::new(
        client as Arc<dyn ManagerApi>,
        rigstudio_control::Config::new(config.manager_url.clone()),
        remote_leader,
    )
}
