//! Generation tracker
//!
//! Drives a batch of requests the way the demo flow does: every request is
//! submitted up front, then each accepted job is awaited one at a time in
//! submission order. Jobs are never polled concurrently.

use tokio_util::sync::CancellationToken;
use tracing::info;
use vidgen_core::domain::job::{JobId, JobStatus, SubmissionResult};
use vidgen_core::domain::request::{GenerationMode, GenerationRequest};

use super::poller::{PollError, PollReport, StatusPoller};
use crate::submitter::JobSubmitter;

/// A request together with what the submitter made of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: GenerationMode,
    pub result: SubmissionResult,
}

/// Final word on one submission of a batch
#[derive(Debug, Clone)]
pub enum TrackedJob {
    /// Never accepted, so never polled
    Rejected { mode: GenerationMode, reason: String },
    /// Reached a terminal state
    Finished {
        mode: GenerationMode,
        report: PollReport,
    },
    /// Accepted, but polling stopped before a terminal state
    Abandoned {
        mode: GenerationMode,
        job_id: JobId,
        error: PollError,
    },
}

/// Callbacks invoked while a batch is being tracked
pub trait TrackerObserver: Send {
    /// A request went through the submitter
    fn submitted(&mut self, _submission: &Submission) {}

    /// Polling of an accepted job is about to start
    fn tracking(&mut self, _mode: GenerationMode, _job_id: &JobId) {}

    /// A snapshot was taken, in-flight or terminal
    fn snapshot(&mut self, _status: &JobStatus) {}

    /// A submission reached its final outcome
    fn finished(&mut self, _job: &TrackedJob) {}
}

/// Observer that ignores everything
impl TrackerObserver for () {}

/// Submits requests and awaits their jobs serially
#[derive(Clone)]
pub struct GenerationTracker {
    submitter: JobSubmitter,
    poller: StatusPoller,
}

impl GenerationTracker {
    pub fn new(submitter: JobSubmitter, poller: StatusPoller) -> Self {
        Self { submitter, poller }
    }

    pub fn submitter(&self) -> &JobSubmitter {
        &self.submitter
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    /// Submits every request in order, one outbound call each
    pub async fn submit_all<O: TrackerObserver>(
        &self,
        requests: &[GenerationRequest],
        observer: &mut O,
    ) -> Vec<Submission> {
        let mut submissions = Vec::with_capacity(requests.len());

        for request in requests {
            let submission = Submission {
                mode: request.mode(),
                result: self.submitter.submit(request).await,
            };
            observer.submitted(&submission);
            submissions.push(submission);
        }

        submissions
    }

    /// Awaits each accepted submission in order
    ///
    /// Once `cancel` fires the remaining accepted jobs are reported as
    /// abandoned without being queried.
    pub async fn await_each<O: TrackerObserver>(
        &self,
        submissions: Vec<Submission>,
        cancel: &CancellationToken,
        observer: &mut O,
    ) -> Vec<TrackedJob> {
        let mut tracked = Vec::with_capacity(submissions.len());

        for Submission { mode, result } in submissions {
            let job = match result {
                SubmissionResult::Rejected { reason } => TrackedJob::Rejected { mode, reason },
                SubmissionResult::Accepted { job_id } if cancel.is_cancelled() => {
                    TrackedJob::Abandoned {
                        mode,
                        error: PollError::Cancelled {
                            job_id: job_id.clone(),
                            attempts: 0,
                        },
                        job_id,
                    }
                }
                SubmissionResult::Accepted { job_id } => {
                    observer.tracking(mode, &job_id);
                    let outcome = self
                        .poller
                        .wait_with(&job_id, cancel, |status| observer.snapshot(status))
                        .await;
                    match outcome {
                        Ok(report) => TrackedJob::Finished { mode, report },
                        Err(error) => TrackedJob::Abandoned {
                            mode,
                            job_id,
                            error,
                        },
                    }
                }
            };

            observer.finished(&job);
            tracked.push(job);
        }

        info!("Tracked {} submission(s)", tracked.len());
        tracked
    }

    /// Submits and awaits a whole batch
    pub async fn run<O: TrackerObserver>(
        &self,
        requests: &[GenerationRequest],
        cancel: &CancellationToken,
        observer: &mut O,
    ) -> Vec<TrackedJob> {
        let submissions = self.submit_all(requests, observer).await;
        self.await_each(submissions, cancel, observer).await
    }
}
