//! Console reporter
//!
//! Renders submissions, progress snapshots and final outcomes.

use colored::*;
use vidgen_core::domain::job::{JobId, JobState, JobStatus, SubmissionResult};
use vidgen_core::domain::request::GenerationMode;
use vidgen_tracker::{PollError, PollReport, Submission, TrackedJob, TrackerObserver};

/// Prints tracker events to stdout as they happen
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl TrackerObserver for ConsoleReporter {
    fn submitted(&mut self, submission: &Submission) {
        println!("{}", submission_line(submission.mode, &submission.result));
    }

    fn tracking(&mut self, mode: GenerationMode, job_id: &JobId) {
        println!();
        println!(
            "{} {}",
            format!("Waiting for {} job", mode_title(mode)).bold(),
            job_id.to_string().cyan()
        );
    }

    fn snapshot(&mut self, status: &JobStatus) {
        println!("{}", snapshot_line(status));
    }

    fn finished(&mut self, job: &TrackedJob) {
        match job {
            // already reported at submission time
            TrackedJob::Rejected { .. } => {}
            TrackedJob::Finished { report, .. } => print_report(report),
            TrackedJob::Abandoned { error, .. } => println!("{}", poll_error_line(error)),
        }
    }
}

pub fn mode_title(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::TextToVideo => "Text-to-video",
        GenerationMode::ImageToVideo => "Image-to-video",
        GenerationMode::Soul => "Soul mode",
    }
}

pub fn submission_line(mode: GenerationMode, result: &SubmissionResult) -> String {
    match result {
        SubmissionResult::Accepted { job_id } => format!(
            "{} {} generation started: {}",
            "✅".green(),
            mode_title(mode),
            job_id.to_string().cyan()
        ),
        SubmissionResult::Rejected { reason } => format!(
            "{} {} generation failed: {}",
            "❌".red(),
            mode_title(mode),
            reason.red()
        ),
    }
}

pub fn snapshot_line(status: &JobStatus) -> String {
    format!(
        "{} {} - Status: {} ({})",
        "⏳".yellow(),
        status.job_id.to_string().dimmed(),
        colorize_state(&status.state),
        status.job_type.as_deref().unwrap_or("unknown")
    )
}

/// Lines describing a terminal snapshot
pub fn terminal_lines(status: &JobStatus) -> Vec<String> {
    match &status.state {
        JobState::Completed(output) => {
            let mut lines = vec![format!(
                "{} Video completed: {}",
                "✨".green(),
                output.video_url.green()
            )];
            if let Some(image_url) = &output.image_url {
                lines.push(format!("   Source image: {}", image_url.dimmed()));
            }
            if output.reference_image_urls.is_some() || output.reference_images_count.is_some() {
                let count = output
                    .reference_images_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "?".to_string());
                lines.push(format!("   Reference images: {} images", count));
            }
            lines
        }
        JobState::Failed { error } => {
            vec![format!("{} Generation failed: {}", "❌".red(), error.red())]
        }
        JobState::QueryError { message } => vec![format!(
            "{} {} - Error checking status: {}",
            "❌".red(),
            status.job_id,
            message.red()
        )],
        in_flight => vec![format!(
            "{} {} - still {}",
            "⏳".yellow(),
            status.job_id,
            in_flight
        )],
    }
}

pub fn poll_error_line(error: &PollError) -> String {
    let suffix = error
        .last_status()
        .map(|last| format!(" (last status: {})", last.state))
        .unwrap_or_default();
    format!("{} {}{}", "⚠".yellow(), error.to_string().yellow(), suffix)
}

pub fn print_report(report: &PollReport) {
    for line in terminal_lines(&report.status) {
        println!("{}", line);
    }
}

pub fn print_status(status: &JobStatus) {
    println!("{}", "Job Status:".bold());
    println!("  ID:        {}", status.job_id.to_string().cyan());
    println!("  State:     {}", colorize_state(&status.state));
    if let Some(job_type) = &status.job_type {
        println!("  Type:      {}", job_type);
    }
    println!(
        "  Observed:  {}",
        status.observed_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    if status.is_terminal() {
        println!();
        for line in terminal_lines(status) {
            println!("{}", line);
        }
    }
}

/// Colorize job state for display
fn colorize_state(state: &JobState) -> ColoredString {
    let label = state.label();
    match state {
        JobState::Pending | JobState::InQueue => label.yellow(),
        JobState::InProgress => label.cyan(),
        JobState::Completed(_) => label.green(),
        JobState::Failed { .. } | JobState::QueryError { .. } => label.red(),
    }
}
