//! Vidgen Tracker
//!
//! Submission and completion tracking for remote video generation jobs.
//!
//! Architecture:
//! - Configuration: polling interval and budgets, from code or environment
//! - Submitter: validates a request and turns it into one submission result
//! - Scheduler: status polling and serial tracking of submitted batches
//!
//! Polling is cooperative and single-task: one job is awaited at a time,
//! suspending only on network calls and between polls.

pub mod config;
pub mod scheduler;
pub mod submitter;

#[cfg(test)]
mod testing;

pub use config::TrackerConfig;
pub use scheduler::{
    GenerationTracker, PollError, PollReport, StatusPoller, Submission, TrackedJob,
    TrackerObserver,
};
pub use submitter::JobSubmitter;
