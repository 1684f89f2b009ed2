//! Job command handlers
//!
//! Starting and stopping the four rig jobs, plus status display.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use rigstudio_control::{GateState, ViewState};
use rigstudio_core::domain::job::JobMode;
use rigstudio_core::domain::leader::LeaderState;
use rigstudio_core::dto::process::{
    JobRequest, RecordParams, ReplayParams, TeleoperateParams, TrainParams,
};

use crate::config::Config;

use super::{control_plane, fetch_rig_config, manager_client};

/// Job start subcommands
#[derive(Subcommand)]
pub enum StartCommands {
    /// Start teleoperation
    Teleoperate {
        /// Disable the live data display
        #[arg(long)]
        no_display: bool,

        /// Restrict to the top camera
        #[arg(long)]
        top_camera_only: bool,
    },
    /// Start a recording session
    Record {
        /// Dataset repo ID (manager default when omitted)
        #[arg(long)]
        repo_id: Option<String>,

        /// Number of episodes to record
        #[arg(long)]
        episodes: Option<u32>,

        /// Episode duration in seconds
        #[arg(long)]
        episode_time: Option<u32>,

        /// Task description stored with the dataset
        #[arg(long)]
        task: Option<String>,

        /// Upload the dataset when recording finishes
        #[arg(long)]
        push_to_hub: bool,

        /// Restrict to the top camera
        #[arg(long)]
        top_camera_only: bool,
    },
    /// Start a training run
    Train {
        /// Dataset repo ID to train on
        #[arg(long)]
        dataset: Option<String>,

        /// Policy type (e.g. act)
        #[arg(long)]
        policy_type: Option<String>,

        /// Output directory for checkpoints
        #[arg(long)]
        output_dir: Option<String>,

        /// Job name for the run
        #[arg(long)]
        job_name: Option<String>,
    },
    /// Replay a recorded episode on the follower
    Replay {
        /// Dataset repo ID
        #[arg(long)]
        repo_id: Option<String>,

        /// Episode index to replay
        #[arg(long)]
        episode: Option<u32>,
    },
}

impl StartCommands {
    fn into_request(self) -> JobRequest {
        match self {
            StartCommands::Teleoperate {
                no_display,
                top_camera_only,
            } => JobRequest::Teleoperate(TeleoperateParams {
                display_data: !no_display,
                use_top_camera_only: top_camera_only.then_some(true),
            }),
            StartCommands::Record {
                repo_id,
                episodes,
                episode_time,
                task,
                push_to_hub,
                top_camera_only,
            } => JobRequest::Record(RecordParams {
                repo_id,
                num_episodes: episodes,
                episode_time_s: episode_time,
                single_task: task,
                push_to_hub: push_to_hub.then_some(true),
                use_top_camera_only: top_camera_only.then_some(true),
            }),
            StartCommands::Train {
                dataset,
                policy_type,
                output_dir,
                job_name,
            } => JobRequest::Train(TrainParams {
                dataset_repo_id: dataset,
                policy_type,
                output_dir,
                job_name,
            }),
            StartCommands::Replay { repo_id, episode } => {
                JobRequest::Replay(ReplayParams { repo_id, episode })
            }
        }
    }
}

/// Handle start commands
pub async fn handle_start_command(command: StartCommands, config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let rig = fetch_rig_config(&client).await;
    let cp = control_plane(config, client, rig.robot.remote_leader);
    cp.prime().await;

    let req = command.into_request();
    let kind = req.kind();
    let ack = cp.start_job(req).await?;

    println!("{} {} started ({})", "✓".green(), kind, ack.status.dimmed());
    Ok(())
}

/// Stop whatever job is running
pub async fn stop(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let rig = fetch_rig_config(&client).await;
    let cp = control_plane(config, client, rig.robot.remote_leader);

    let ack = cp.stop_job().await?;
    println!("{} stop acknowledged ({})", "✓".green(), ack.status.dimmed());
    Ok(())
}

/// Show current status
pub async fn status(config: &Config, logs: Option<usize>) -> Result<()> {
    let client = manager_client(config)?;
    let rig = fetch_rig_config(&client).await;
    let remote_leader = rig.robot.remote_leader;
    let cp = control_plane(config, client, remote_leader);
    cp.prime().await;

    let view = cp.view();
    print_view(&view, remote_leader);

    if let Some(lines) = logs {
        let tail_start = view.job.logs.len().saturating_sub(lines);
        let tail = &view.job.logs[tail_start..];
        if tail.is_empty() {
            println!("{}", "No process logs.".yellow());
        } else {
            println!("{}", "─".repeat(60).dimmed());
            for line in tail {
                println!("{}", line);
            }
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Print the rig configuration as JSON
pub async fn show_config(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let rig = client.rig_config().await?;
    println!("{}", serde_json::to_string_pretty(&rig)?);
    Ok(())
}

/// Poll and print status continuously until Ctrl-C
pub async fn watch(config: &Config) -> Result<()> {
    let client = manager_client(config)?;
    let rig = fetch_rig_config(&client).await;
    let remote_leader = rig.robot.remote_leader;
    let cp = control_plane(config, client, remote_leader);
    cp.start().await;

    println!("{}", "Watching rig status (Ctrl-C to exit)".bold());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
                print_status_line(&cp.view());
            }
        }
    }

    cp.shutdown();
    println!();
    Ok(())
}

fn print_view(view: &ViewState, remote_leader: bool) {
    let mode = colorize_mode(view.job.mode, view.job.running);
    match view.job.pid {
        Some(pid) => println!("  Job:    {} (pid {})", mode, pid),
        None => println!("  Job:    {}", mode),
    }

    if remote_leader {
        let endpoint = match (&view.leader.host, view.leader.port) {
            (Some(host), Some(port)) => format!(" at {host}:{port}"),
            _ => String::new(),
        };
        println!(
            "  Leader: {}{}",
            colorize_leader(view.leader.state),
            endpoint.dimmed()
        );
    } else {
        println!("  Leader: {}", "local (remote leader disabled)".dimmed());
    }

    match view.gate {
        GateState::Open => println!("  Gate:   {}", "open".green()),
        GateState::Closed => println!(
            "  Gate:   {} {}",
            "closed".red(),
            "(teleoperate/record blocked)".dimmed()
        ),
    }

    if let Some(error) = &view.job.error {
        println!("  Error:  {}", error.red());
    }
}

fn print_status_line(view: &ViewState) {
    let mode = colorize_mode(view.job.mode, view.job.running);
    let leader = colorize_leader(view.leader.state);
    let busy = if view.busy {
        " [busy]".yellow()
    } else {
        "".normal()
    };
    println!("  {} | leader: {}{}", mode, leader, busy);
}

fn colorize_mode(mode: JobMode, running: bool) -> colored::ColoredString {
    if !running {
        return "idle".dimmed();
    }
    match mode {
        JobMode::Teleoperate => mode.as_str().green(),
        JobMode::Record => mode.as_str().blue(),
        JobMode::Train => mode.as_str().purple(),
        JobMode::Replay => mode.as_str().yellow(),
        JobMode::Idle => mode.as_str().dimmed(),
    }
}

fn colorize_leader(state: LeaderState) -> colored::ColoredString {
    match state {
        LeaderState::Running => state.as_str().green(),
        LeaderState::Stopped => state.as_str().red(),
        LeaderState::Unknown => state.as_str().yellow(),
    }
}
