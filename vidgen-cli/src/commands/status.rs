//! Status command handlers
//!
//! Single status lookups and polling of already submitted jobs.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use vidgen_core::domain::job::{JobId, JobState};
use vidgen_tracker::{PollReport, StatusPoller, TrackerObserver};

use crate::config::Config;
use crate::reporter::{self, ConsoleReporter};

/// Query a job once and print the snapshot
pub async fn show_status(config: &Config, id: &str, json: bool) -> Result<()> {
    let tracker = config.tracker()?;
    let status = tracker.poller().query_once(&parse_job_id(id)?).await;

    if json {
        let rendered =
            serde_json::to_string_pretty(&status).context("Failed to serialize job status")?;
        println!("{}", rendered);
    } else {
        reporter::print_status(&status);
    }

    if let JobState::QueryError { message } = &status.state {
        anyhow::bail!("Could not fetch status of {}: {}", status.job_id, message);
    }

    Ok(())
}

/// Poll an existing job until it finishes
pub async fn wait_for_job(config: &Config, id: &str, cancel: &CancellationToken) -> Result<()> {
    let tracker = config.tracker()?;
    let job_id = parse_job_id(id)?;

    let report = follow(tracker.poller(), &job_id, cancel).await?;
    ensure_completed(&report)
}

/// Poll with console progress, printing the final outcome
pub(super) async fn follow(
    poller: &StatusPoller,
    job_id: &JobId,
    cancel: &CancellationToken,
) -> Result<PollReport> {
    let mut console = ConsoleReporter;
    let report = poller
        .wait_with(job_id, cancel, |status| console.snapshot(status))
        .await
        .map_err(|e| anyhow::anyhow!(reporter::poll_error_line(&e)))?;

    reporter::print_report(&report);
    Ok(report)
}

/// Turns anything but a completed job into a non-zero exit
pub(super) fn ensure_completed(report: &PollReport) -> Result<()> {
    match &report.status.state {
        JobState::Completed(_) => Ok(()),
        other => anyhow::bail!(
            "Job {} finished as {} after {} attempt(s)",
            report.status.job_id,
            other,
            report.attempts
        ),
    }
}

fn parse_job_id(id: &str) -> Result<JobId> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("job id must not be empty");
    }
    Ok(JobId::new(id))
}
