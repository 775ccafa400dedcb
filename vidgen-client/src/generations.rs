//! Generation-related API endpoints

use crate::GenerationClient;
use crate::error::{ClientError, Result};
use tracing::debug;
use vidgen_core::domain::job::JobId;
use vidgen_core::domain::request::{GenerationMode, GenerationRequest};
use vidgen_core::dto::generation::{CreateGeneration, GenerationCreated, GenerationStatusResponse};

/// Creation endpoint for each generation mode
pub(crate) fn create_path(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::TextToVideo => "v1/text2video",
        GenerationMode::ImageToVideo => "v1/image2video",
        GenerationMode::Soul => "v1/image2video/soul",
    }
}

impl GenerationClient {
    // =============================================================================
    // Job Creation
    // =============================================================================

    /// Start a new generation
    ///
    /// Sends exactly one request to the creation endpoint of the request's
    /// mode. Nothing is retried.
    ///
    /// # Returns
    /// The identifier the service allocated for the job
    pub async fn create_generation(&self, request: &GenerationRequest) -> Result<JobId> {
        let url = self.endpoint(create_path(request.mode()));
        debug!(mode = %request.mode(), %url, "Creating generation");

        let response = self
            .authorized(self.client.post(&url))
            .json(&CreateGeneration::from(request))
            .send()
            .await?;

        let created: GenerationCreated = self.handle_response(response).await?;
        if created.generation_id.trim().is_empty() {
            return Err(ClientError::ParseError(
                "creation response carried an empty generation id".to_string(),
            ));
        }

        Ok(JobId::new(created.generation_id))
    }

    // =============================================================================
    // Job Status
    // =============================================================================

    /// Fetch the current status of a generation
    ///
    /// # Arguments
    /// * `job_id` - Identifier returned by [`GenerationClient::create_generation`]
    pub async fn get_generation(&self, job_id: &JobId) -> Result<GenerationStatusResponse> {
        if job_id.as_str().is_empty() {
            return Err(ClientError::InvalidRequest(
                "job id must not be empty".to_string(),
            ));
        }

        let url = self.endpoint_with("v1/generations", job_id.as_str())?;
        let response = self.authorized(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers one request with `body` and hands back its request line
    async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    #[test]
    fn test_each_mode_has_its_own_endpoint() {
        let paths = [
            create_path(GenerationMode::TextToVideo),
            create_path(GenerationMode::ImageToVideo),
            create_path(GenerationMode::Soul),
        ];
        assert_eq!(paths, ["v1/text2video", "v1/image2video", "v1/image2video/soul"]);
    }

    #[tokio::test]
    async fn test_empty_job_id_is_refused_locally() {
        let client = GenerationClient::new("http://127.0.0.1:9", "key");
        let err = client.get_generation(&JobId::new("")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_status_lookup_keeps_job_id_in_path() {
        let (base_url, server) = serve_once(r#"{"status": "in_queue"}"#).await;
        let client = GenerationClient::new(base_url, "key");

        let response = client
            .get_generation(&JobId::new("abc?x=1#frag"))
            .await
            .unwrap();

        assert_eq!(response.status, "in_queue");
        assert_eq!(
            server.await.unwrap(),
            "GET /v1/generations/abc%3Fx=1%23frag HTTP/1.1"
        );
    }
}
