//! Scripted stand-in for the remote generation API

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vidgen_client::{ClientError, GenerationApi, Result};
use vidgen_core::domain::job::JobId;
use vidgen_core::domain::request::GenerationRequest;
use vidgen_core::dto::generation::GenerationStatusResponse;

/// Replays queued responses in order
///
/// Once the status script runs dry the `sticky` response (if any) is served
/// forever, which models a job that stays terminal.
#[derive(Default)]
pub struct ScriptedApi {
    created: Mutex<VecDeque<Result<JobId>>>,
    statuses: Mutex<VecDeque<Result<GenerationStatusResponse>>>,
    sticky: Mutex<Option<GenerationStatusResponse>>,
    create_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_created(&self, result: Result<JobId>) {
        self.created.lock().unwrap().push_back(result);
    }

    pub fn push_status(&self, status: &str) {
        self.push_response(Ok(GenerationStatusResponse::new(status)));
    }

    pub fn push_response(&self, result: Result<GenerationStatusResponse>) {
        self.statuses.lock().unwrap().push_back(result);
    }

    pub fn set_sticky(&self, response: GenerationStatusResponse) {
        *self.sticky.lock().unwrap() = Some(response);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

pub fn completed(video_url: &str) -> GenerationStatusResponse {
    GenerationStatusResponse {
        video_url: Some(video_url.to_string()),
        job_type: Some("text2video".to_string()),
        ..GenerationStatusResponse::new("completed")
    }
}

#[async_trait]
impl GenerationApi for ScriptedApi {
    async fn create_generation(&self, _request: &GenerationRequest) -> Result<JobId> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::InvalidRequest("no creation scripted".into())))
    }

    async fn get_generation(&self, _job_id: &JobId) -> Result<GenerationStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.statuses.lock().unwrap().pop_front() {
            return next;
        }
        match self.sticky.lock().unwrap().clone() {
            Some(response) => Ok(response),
            None => Err(ClientError::ParseError("status script exhausted".into())),
        }
    }
}
