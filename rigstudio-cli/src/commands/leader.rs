//! Leader service command handlers
//!
//! Lifecycle commands route through the control plane so the mandatory
//! ordering (stop the active job before tearing the leader down) holds no
//! matter which subcommand asked for it.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use rigstudio_core::domain::leader::LeaderState;

use crate::config::Config;

use super::{control_plane, fetch_rig_config, manager_client};

/// Leader service subcommands
#[derive(Subcommand)]
pub enum LeaderCommands {
    /// Check leader service liveness
    Status,
    /// Start the leader service
    Start,
    /// Stop the leader service (stops the active job first)
    Stop,
    /// Toggle the leader service
    Toggle,
    /// Tail the leader service log
    Logs {
        /// Number of trailing lines to fetch
        #[arg(long, default_value_t = 30)]
        lines: usize,
    },
}

/// Handle leader commands
pub async fn handle_leader_command(command: LeaderCommands, config: &Config) -> Result<()> {
    match command {
        LeaderCommands::Status => status(config).await,
        LeaderCommands::Start => start(config).await,
        LeaderCommands::Stop => stop(config).await,
        LeaderCommands::Toggle => toggle(config).await,
        LeaderCommands::Logs { lines } => logs(config, lines).await,
    }
}

async fn status(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let leader = client.leader_service_status().await?;

    let state = match leader.state {
        LeaderState::Running => "running".green(),
        LeaderState::Stopped => "stopped".red(),
        LeaderState::Unknown => "unknown".yellow(),
    };
    match (&leader.host, leader.port) {
        (Some(host), Some(port)) => {
            println!("Leader service: {} at {}:{}", state, host, port)
        }
        _ => println!("Leader service: {}", state),
    }
    Ok(())
}

async fn start(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let cp = control_plane(config, client, true);
    cp.prime().await;

    if cp.view().leader.state == LeaderState::Running {
        println!("{}", "Leader service is already running.".yellow());
        return Ok(());
    }

    let ack = cp.toggle_leader().await?;
    println!(
        "{} leader service {}",
        "✓".green(),
        ack.status.dimmed()
    );
    Ok(())
}

async fn stop(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let cp = control_plane(config, client, true);
    cp.prime().await;

    if cp.view().leader.state != LeaderState::Running {
        println!("{}", "Leader service is not running.".yellow());
        return Ok(());
    }

    let ack = cp.toggle_leader().await?;
    println!(
        "{} leader service {}",
        "✓".green(),
        ack.status.dimmed()
    );
    Ok(())
}

async fn toggle(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let rig = fetch_rig_config(&client).await;
    let cp = control_plane(config, client, rig.robot.remote_leader);
    cp.prime().await;

    let ack = cp.toggle_leader().await?;
    println!(
        "{} leader service {}",
        "✓".green(),
        ack.status.dimmed()
    );
    Ok(())
}

async fn logs(config: &Config, lines: usize) -> Result<()> {
    let client = manager_client(config)?;
    let result = client.leader_service_logs(Some(lines)).await?;

    if let Some(error) = result.error {
        println!("{} {}", "⚠".yellow(), error);
        return Ok(());
    }

    if result.logs.is_empty() {
        println!("{}", "No leader service logs.".yellow());
    } else {
        println!("{}", "─".repeat(60).dimmed());
        for line in result.logs {
            println!("{}", line);
        }
        println!("{}", "─".repeat(60).dimmed());
    }
    Ok(())
}
