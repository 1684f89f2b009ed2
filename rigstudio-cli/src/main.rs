//! Rigstudio CLI
//!
//! Command-line interface for operating the rig through its process
//! manager: start and stop jobs, manage the remote leader service, and
//! watch live status.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rigstudio")]
#[command(about = "Robot rig operations CLI", long_about = None)]
struct Cli {
    /// Process manager URL
    #[arg(
        long,
        env = "RIGSTUDIO_MANAGER_URL",
        default_value = "http://localhost:8000"
    )]
    manager_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rigstudio_control=warn,rigstudio_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        manager_url: cli.manager_url,
    };

    handle_command(cli.command, &config).await
}
