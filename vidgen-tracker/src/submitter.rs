//! Job submitter
//!
//! Turns a [`GenerationRequest`] into exactly one [`SubmissionResult`].
//! Validation and transport failures are folded into `Rejected`; nothing is
//! propagated past this boundary and nothing is retried.

use std::sync::Arc;

use tracing::{info, warn};
use vidgen_client::GenerationApi;
use vidgen_core::domain::job::SubmissionResult;
use vidgen_core::domain::request::GenerationRequest;

/// Submits generation requests to the remote service
#[derive(Clone)]
pub struct JobSubmitter {
    api: Arc<dyn GenerationApi>,
}

impl JobSubmitter {
    pub fn new(api: Arc<dyn GenerationApi>) -> Self {
        Self { api }
    }

    /// Submits one request
    ///
    /// Invalid requests are rejected locally without contacting the service.
    pub async fn submit(&self, request: &GenerationRequest) -> SubmissionResult {
        let mode = request.mode();

        if let Err(e) = request.validate() {
            warn!(%mode, "Rejected generation request: {}", e);
            return SubmissionResult::Rejected {
                reason: e.to_string(),
            };
        }

        match self.api.create_generation(request).await {
            Ok(job_id) => {
                info!(%mode, %job_id, "Generation accepted");
                SubmissionResult::Accepted { job_id }
            }
            Err(e) => {
                warn!(%mode, "Generation submission failed: {}", e);
                SubmissionResult::Rejected {
                    reason: e.to_string(),
                }
            }
        }
    }
}
