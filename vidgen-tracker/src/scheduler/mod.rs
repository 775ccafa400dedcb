//! Scheduler layer for the tracker
//!
//! This layer handles polling the remote service for job status and
//! coordinating a batch of jobs from submission to their terminal state.

pub mod poller;
pub mod tracker;

pub use poller::{PollError, PollReport, StatusPoller};
pub use tracker::{GenerationTracker, Submission, TrackedJob, TrackerObserver};
