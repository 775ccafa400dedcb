//! Generate command handlers
//!
//! Submits one generation per invocation and optionally follows it.

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;
use vidgen_core::domain::job::SubmissionResult;
use vidgen_core::domain::request::{GenerationParams, GenerationRequest};

use super::status::{ensure_completed, follow};
use crate::config::Config;
use crate::reporter;

/// Options shared by every mode
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Clip length in seconds
    #[arg(long)]
    duration: Option<u32>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Poll the job until it finishes
    #[arg(short, long)]
    wait: bool,
}

impl CommonArgs {
    fn params(&self) -> GenerationParams {
        GenerationParams::new(self.duration, self.seed)
    }
}

/// Generate subcommands
#[derive(Subcommand)]
pub enum GenerateCommands {
    /// Text-to-video
    Text {
        /// Scene description
        prompt: String,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Image-to-video
    Image {
        /// Scene description
        prompt: String,

        /// URL of the source image
        #[arg(long)]
        image_url: String,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Soul mode, composing several reference images
    Soul {
        /// Scene description
        prompt: String,

        /// Reference image URL (repeat for more, order is kept)
        #[arg(long = "reference", required = true)]
        references: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Handle generate commands
pub async fn handle_generate_command(
    command: GenerateCommands,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let (request, wait) = build_request(command);
    let mode = request.mode();
    let tracker = config.tracker()?;

    let result = tracker.submitter().submit(&request).await;
    println!("{}", reporter::submission_line(mode, &result));

    match result {
        SubmissionResult::Rejected { reason } => {
            anyhow::bail!("{} submission rejected: {}", mode, reason)
        }
        SubmissionResult::Accepted { job_id } if wait => {
            let report = follow(tracker.poller(), &job_id, cancel).await?;
            ensure_completed(&report)
        }
        SubmissionResult::Accepted { .. } => Ok(()),
    }
}

fn build_request(command: GenerateCommands) -> (GenerationRequest, bool) {
    match command {
        GenerateCommands::Text { prompt, common } => (
            GenerationRequest::text_to_video(prompt, common.params()),
            common.wait,
        ),
        GenerateCommands::Image {
            prompt,
            image_url,
            common,
        } => (
            GenerationRequest::image_to_video(prompt, image_url, common.params()),
            common.wait,
        ),
        GenerateCommands::Soul {
            prompt,
            references,
            common,
        } => (
            GenerationRequest::SoulMode {
                prompt,
                reference_image_urls: references,
                params: common.params(),
            },
            common.wait,
        ),
    }
}
