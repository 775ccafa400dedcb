//! Vidgen CLI
//!
//! Command-line interface for submitting video generation jobs and
//! following them until they finish.

mod commands;
mod config;
mod reporter;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, TrackingArgs};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "vidgen")]
#[command(about = "Video generation job CLI", long_about = None)]
struct Cli {
    /// Generation API base URL
    #[arg(
        long,
        global = true,
        env = "HIGGSFIELD_API_URL",
        default_value = config::DEFAULT_API_URL
    )]
    api_url: String,

    /// Generation API key
    #[arg(long, global = true, env = "HIGGSFIELD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(flatten)]
    tracking: TrackingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the shell
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidgen=warn,vidgen_tracker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.api_url, cli.api_key, &cli.tracking)?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    handle_command(cli.command, &config, &cancel).await
}

/// Cancels tracking on Ctrl-C so the current wait returns promptly
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            cancel.cancel();
        }
    });
}
