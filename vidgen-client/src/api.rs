//! Trait seam over the generation endpoints

use async_trait::async_trait;
use vidgen_core::domain::job::JobId;
use vidgen_core::domain::request::GenerationRequest;
use vidgen_core::dto::generation::GenerationStatusResponse;

use crate::GenerationClient;
use crate::error::Result;

/// Operations the submitter and poller need from the remote service
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Issue one creation request and return the allocated job id
    async fn create_generation(&self, request: &GenerationRequest) -> Result<JobId>;

    /// Query the status of a job once
    async fn get_generation(&self, job_id: &JobId) -> Result<GenerationStatusResponse>;
}

#[async_trait]
impl GenerationApi for GenerationClient {
    async fn create_generation(&self, request: &GenerationRequest) -> Result<JobId> {
        GenerationClient::create_generation(self, request).await
    }

    async fn get_generation(&self, job_id: &JobId) -> Result<GenerationStatusResponse> {
        GenerationClient::get_generation(self, job_id).await
    }
}
