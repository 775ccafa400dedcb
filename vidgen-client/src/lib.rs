//! Vidgen HTTP Client
//!
//! A small, type-safe HTTP client for the remote video generation API.
//!
//! The client covers the two endpoints the tracker needs: job creation (one
//! per generation mode) and status lookup. Both are also exposed through the
//! [`GenerationApi`] trait so that callers can be driven by a fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use vidgen_client::GenerationClient;
//! use vidgen_core::domain::request::{GenerationParams, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vidgen_client::ClientError> {
//!     let client = GenerationClient::new("https://platform.higgsfield.ai", "my-api-key");
//!
//!     let request = GenerationRequest::text_to_video(
//!         "A cat playing with a ball",
//!         GenerationParams::new(Some(10), Some(42)),
//!     );
//!     let job_id = client.create_generation(&request).await?;
//!
//!     println!("Started generation: {}", job_id);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod generations;

// Re-export commonly used types
pub use api::GenerationApi;
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use vidgen_core::dto::generation::ApiErrorBody;

/// HTTP client for the generation API
#[derive(Clone)]
pub struct GenerationClient {
    /// Base URL of the API (e.g., "https://platform.higgsfield.ai")
    base_url: String,
    /// Bearer credential sent with every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GenerationClient {
    /// Create a new generation client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API
    /// * `api_key` - The API credential
    ///
    /// # Example
    /// ```
    /// use vidgen_client::GenerationClient;
    ///
    /// let client = GenerationClient::new("https://platform.higgsfield.ai", "key");
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new generation client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use vidgen_client::GenerationClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GenerationClient::with_client("https://platform.higgsfield.ai", "key", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Endpoint URL with `segment` appended as one percent-encoded path
    /// segment, so ids containing `/`, `?` or `#` stay inside the path
    fn endpoint_with(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint(path)).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid API URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "API URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .push(segment);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] carrying the most
    /// specific message the body offers.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                error_message(&error_text, status.canonical_reason()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extracts a human-readable message from an error response body
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Some(message) = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    reason.unwrap_or("Unknown error").to_string()
}
