use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use shield_application::{PollOutcome, SessionSyncService};
use shield_core::config::ConfigOverrides;
use shield_infrastructure::{ConfigService, HttpSessionGateway};
use tokio::sync::mpsc;

mod commands;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "crowd-shield")]
#[command(about = "Crowd Shield - operator console for reviewing safety incidents", long_about = None)]
struct Cli {
    /// Base URL of the session backend
    #[arg(long)]
    backend_url: Option<String>,

    /// Live camera feed shown when no incident is selected
    #[arg(long)]
    live_feed_url: Option<String>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll once, print the alerts and exit
    #[arg(long)]
    once: bool,

    /// Write logs to stderr instead of the log file
    #[arg(long)]
    log_stderr: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_stderr);

    let overrides = ConfigOverrides {
        backend_url: cli.backend_url,
        live_feed_url: cli.live_feed_url,
        default_camera_id: None,
    };
    let config = ConfigService::load(cli.config.as_deref(), overrides)?;
    let gateway = Arc::new(HttpSessionGateway::new(&config.backend_url)?);

    if cli.once {
        let service = SessionSyncService::new(gateway);
        return match service.poll_once().await {
            PollOutcome::Applied(_) => {
                repl::print_state(&service.state().await, &config);
                Ok(())
            }
            PollOutcome::Failed(e) => bail!("Failed to fetch sessions: {}", e),
            PollOutcome::Cancelled => bail!("Poll was cancelled"),
        };
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let service = SessionSyncService::new(gateway).with_events(events_tx);
    repl::run(service, events_rx, config).await
}
