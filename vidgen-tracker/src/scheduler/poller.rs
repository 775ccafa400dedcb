//! Status poller
//!
//! Queries the status of one job at a fixed interval until the job reaches
//! a terminal state. Each query yields a fresh [`JobStatus`] snapshot; the
//! first one is authoritative and is taken without waiting.
//!
//! Polling ends with:
//! - `Completed` / `Failed` when the remote reports a final job outcome
//! - `QueryError` when a status query itself fails (after the configured
//!   retries, none by default) or the remote answers something untrackable
//! - a [`PollError`] when the caller cancels or a configured budget runs out

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vidgen_client::GenerationApi;
use vidgen_core::domain::job::{JobId, JobStatus};

use crate::config::TrackerConfig;

/// Terminal snapshot plus how much work it took to get there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub status: JobStatus,
    /// Poll cycles, i.e. snapshots taken
    pub attempts: u32,
    /// Interval waits between cycles (retry backoffs not included)
    pub waits: u32,
}

/// Polling stopped before the job reached a terminal state
#[derive(Debug, Clone, Error)]
pub enum PollError {
    #[error("tracking of job {job_id} was cancelled after {attempts} attempt(s)")]
    Cancelled { job_id: JobId, attempts: u32 },

    #[error("job {job_id} still in flight after {attempts} attempt(s)")]
    AttemptsExhausted {
        job_id: JobId,
        attempts: u32,
        last: JobStatus,
    },

    #[error("job {job_id} did not finish within {elapsed:?}")]
    TimedOut {
        job_id: JobId,
        elapsed: Duration,
        last: Option<JobStatus>,
    },
}

impl PollError {
    pub fn job_id(&self) -> &JobId {
        match self {
            Self::Cancelled { job_id, .. }
            | Self::AttemptsExhausted { job_id, .. }
            | Self::TimedOut { job_id, .. } => job_id,
        }
    }

    /// Last in-flight snapshot seen before polling stopped, if any
    pub fn last_status(&self) -> Option<&JobStatus> {
        match self {
            Self::Cancelled { .. } => None,
            Self::AttemptsExhausted { last, .. } => Some(last),
            Self::TimedOut { last, .. } => last.as_ref(),
        }
    }
}

/// Why a guarded suspension point returned early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Cancelled,
    Deadline,
}

/// Polls the remote service for the status of individual jobs
#[derive(Clone)]
pub struct StatusPoller {
    config: TrackerConfig,
    api: Arc<dyn GenerationApi>,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(config: TrackerConfig, api: Arc<dyn GenerationApi>) -> Self {
        Self { config, api }
    }

    /// Takes a single snapshot without retries
    pub async fn query_once(&self, job_id: &JobId) -> JobStatus {
        match self.api.get_generation(job_id).await {
            Ok(response) => response.into_job_status(job_id.clone()),
            Err(e) => {
                warn!(%job_id, "Status query failed: {}", e);
                JobStatus::query_error(job_id.clone(), e.to_string())
            }
        }
    }

    /// Polls until the job is terminal
    pub async fn wait_for_completion(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<PollReport, PollError> {
        self.wait_with(job_id, cancel, |_| {}).await
    }

    /// Polls until the job is terminal, handing every snapshot to `on_status`
    /// in query order (the terminal one included)
    pub async fn wait_with<F>(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
        mut on_status: F,
    ) -> Result<PollReport, PollError>
    where
        F: FnMut(&JobStatus) + Send,
    {
        let started = Instant::now();
        let deadline = self.config.timeout.map(|timeout| started + timeout);
        let mut attempts = 0u32;
        let mut waits = 0u32;
        let mut last: Option<JobStatus> = None;

        info!(
            %job_id,
            "Tracking job (interval: {:?})",
            self.config.poll_interval
        );

        loop {
            let status = match self.query_with_retries(job_id, cancel, deadline).await {
                Ok(status) => status,
                Err(interrupt) => {
                    return Err(self.stopped(interrupt, job_id, attempts, started, last));
                }
            };
            attempts += 1;
            on_status(&status);

            if status.is_terminal() {
                info!(
                    %job_id,
                    state = status.state.label(),
                    attempts,
                    waits,
                    "Job reached terminal state"
                );
                return Ok(PollReport {
                    status,
                    attempts,
                    waits,
                });
            }

            debug!(%job_id, state = status.state.label(), attempts, "Job still in flight");

            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                warn!(%job_id, attempts, "Giving up on job, attempt budget exhausted");
                return Err(PollError::AttemptsExhausted {
                    job_id: job_id.clone(),
                    attempts,
                    last: status,
                });
            }

            last = Some(status);

            if let Err(interrupt) = self
                .guarded(time::sleep(self.config.poll_interval), cancel, deadline)
                .await
            {
                return Err(self.stopped(interrupt, job_id, attempts, started, last));
            }
            waits += 1;
        }
    }

    /// One poll cycle: a status query, repeated on transient failures while
    /// the retry budget lasts
    async fn query_with_retries(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
    ) -> Result<JobStatus, Interrupt> {
        let mut retry = 0u32;

        loop {
            match self
                .guarded(self.api.get_generation(job_id), cancel, deadline)
                .await?
            {
                Ok(response) => return Ok(response.into_job_status(job_id.clone())),
                Err(e) if e.is_transient() && retry < self.config.query_retries => {
                    retry += 1;
                    let delay = self.config.retry_delay(retry);
                    warn!(
                        %job_id,
                        "Status query failed (retry {}/{} in {:?}): {}",
                        retry,
                        self.config.query_retries,
                        delay,
                        e
                    );
                    self.guarded(time::sleep(delay), cancel, deadline).await?;
                }
                Err(e) => {
                    warn!(%job_id, "Status query failed, stopping: {}", e);
                    return Ok(JobStatus::query_error(job_id.clone(), e.to_string()));
                }
            }
        }
    }

    /// Runs `fut` unless the token fires or the deadline passes first
    async fn guarded<T>(
        &self,
        fut: impl Future<Output = T>,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
    ) -> Result<T, Interrupt> {
        let expired = async {
            match deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = expired => Err(Interrupt::Deadline),
            out = fut => Ok(out),
        }
    }

    fn stopped(
        &self,
        interrupt: Interrupt,
        job_id: &JobId,
        attempts: u32,
        started: Instant,
        last: Option<JobStatus>,
    ) -> PollError {
        match interrupt {
            Interrupt::Cancelled => {
                info!(%job_id, attempts, "Tracking cancelled");
                PollError::Cancelled {
                    job_id: job_id.clone(),
                    attempts,
                }
            }
            Interrupt::Deadline => {
                let elapsed = started.elapsed();
                warn!(%job_id, attempts, "Giving up on job after {:?}", elapsed);
                PollError::TimedOut {
                    job_id: job_id.clone(),
                    elapsed,
                    last,
                }
            }
        }
    }
}
