//! Pressdash CLI
//!
//! Watches the publishing backend's dashboard endpoints from a terminal,
//! or submits a one-shot row-processing request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use pressdash::io::{HttpClient, ReqwestHttpClient};
use pressdash::surface::Surface;
use pressdash::term::TermSurface;
use pressdash::{load_config, Config, DashboardController};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pressdash")]
#[command(about = "Dashboard client for the content publishing pipeline")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Poll interval in seconds (overrides config file)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the dashboard continuously (the default)
    Watch,
    /// Submit one row-processing request and exit.
    /// Without bounds, the configured canned range is used.
    Process {
        /// First spreadsheet row (inclusive)
        #[arg(long)]
        start: Option<i64>,
        /// Last spreadsheet row (inclusive)
        #[arg(long)]
        end: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(poll_interval) = args.poll_interval {
        config.poll_interval_seconds = poll_interval;
    }

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
    let surface: Arc<dyn Surface> = Arc::new(TermSurface);
    let controller = DashboardController::new(&config, http, surface);

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            tracing::info!(
                "Watching {} every {}s",
                config.base_url,
                config.poll_interval_seconds
            );
            controller.start().await;
            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received");
            controller.stop().await;
        }
        Command::Process { start, end } => {
            match (start, end) {
                (None, None) => {
                    controller.process_canned().await;
                }
                _ => {
                    controller.process_custom(start, end).await;
                }
            }
            // Give the follow-up refresh a chance to print before exiting
            tokio::time::sleep(Duration::from_secs(config.refresh_delay_seconds + 1)).await;
        }
    }

    Ok(())
}
