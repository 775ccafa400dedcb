//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod demo;
mod generate;
mod status;

pub use generate::GenerateCommands;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the text, image and soul mode examples end to end
    Demo,
    /// Submit a single generation
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },
    /// Query the status of a job once
    Status {
        /// Job ID returned at submission
        id: String,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Poll a job until it finishes
    Wait {
        /// Job ID returned at submission
        id: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(
    command: Commands,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        Commands::Demo => demo::run_demo(config, cancel).await,
        Commands::Generate { command } => {
            generate::handle_generate_command(command, config, cancel).await
        }
        Commands::Status { id, json } => status::show_status(config, &id, json).await,
        Commands::Wait { id } => status::wait_for_job(config, &id, cancel).await,
    }
}
