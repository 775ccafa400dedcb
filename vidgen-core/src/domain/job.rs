//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier allocated by the remote service for a generation job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Outcome of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
    Accepted { job_id: JobId },
    Rejected { reason: String },
}

impl SubmissionResult {
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::Accepted { job_id } => Some(job_id),
            Self::Rejected { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Output of a completed generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOutput {
    pub video_url: String,
    /// Source image of an image-to-video job
    pub image_url: Option<String>,
    /// References of a soul mode job
    pub reference_image_urls: Option<Vec<String>>,
    pub reference_images_count: Option<u32>,
}

/// Job state as seen by the poller
///
/// Payloads live inside the variants, so a video URL can only exist on a
/// completed job and an error description only on a failed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Pending,
    InQueue,
    InProgress,
    Completed(VideoOutput),
    /// The job itself failed on the remote side
    Failed { error: String },
    /// The status query failed; says nothing about the job
    QueryError { message: String },
}

impl JobState {
    /// Error text used when the remote reports a failure without details
    pub const UNKNOWN_ERROR: &'static str = "Unknown error";

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::InQueue | Self::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_in_flight()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InQueue => "in_queue",
            Self::InProgress => "in_progress",
            Self::Completed(_) => "completed",
            Self::Failed { .. } => "failed",
            Self::QueryError { .. } => "query_error",
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match self {
            Self::Completed(output) => Some(&output.video_url),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable snapshot produced by one status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub job_id: JobId,
    pub state: JobState,
    /// Remote job type, e.g. "text2video"
    pub job_type: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl JobStatus {
    pub fn new(job_id: JobId, state: JobState, job_type: Option<String>) -> Self {
        Self {
            job_id,
            state,
            job_type,
            observed_at: Utc::now(),
        }
    }

    /// Snapshot for a status query that could not be answered
    pub fn query_error(job_id: JobId, message: impl Into<String>) -> Self {
        Self::new(
            job_id,
            JobState::QueryError {
                message: message.into(),
            },
            None,
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
