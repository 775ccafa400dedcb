//! Generation DTOs for the remote API

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobId, JobState, JobStatus, VideoOutput};
use crate::domain::request::GenerationRequest;

/// Body of the creation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGeneration {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image_urls: Option<Vec<String>>,
}

impl From<&GenerationRequest> for CreateGeneration {
    fn from(request: &GenerationRequest) -> Self {
        let params = request.params();
        let mut body = Self {
            prompt: request.prompt().to_string(),
            duration: params.duration,
            seed: params.seed,
            image_url: None,
            reference_image_urls: None,
        };

        match request {
            GenerationRequest::TextToVideo { .. } => {}
            GenerationRequest::ImageToVideo { image_url, .. } => {
                body.image_url = Some(image_url.clone());
            }
            GenerationRequest::SoulMode {
                reference_image_urls,
                ..
            } => {
                body.reference_image_urls = Some(reference_image_urls.clone());
            }
        }

        body
    }
}

/// Successful creation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCreated {
    #[serde(alias = "id")]
    pub generation_id: String,
}

/// Status strings the remote is known to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    Pending,
    InQueue,
    InProgress,
    Completed,
    Failed,
}

impl RemoteStatus {
    /// Returns `None` for anything outside the documented set
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "in_queue" => Some(Self::InQueue),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Response of the status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStatusResponse {
    pub status: String,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub reference_image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub reference_images_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerationStatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    /// Maps the raw response onto a snapshot.
    ///
    /// Unrecognized status strings and completed jobs without a video URL
    /// both become `QueryError`, since neither can be tracked further.
    pub fn into_job_status(self, job_id: JobId) -> JobStatus {
        let state = match RemoteStatus::parse(&self.status) {
            Some(RemoteStatus::Pending) => JobState::Pending,
            Some(RemoteStatus::InQueue) => JobState::InQueue,
            Some(RemoteStatus::InProgress) => JobState::InProgress,
            Some(RemoteStatus::Completed) => match self.video_url {
                Some(video_url) => JobState::Completed(VideoOutput {
                    video_url,
                    image_url: self.image_url,
                    reference_images_count: self.reference_images_count.or_else(|| {
                        self.reference_image_urls
                            .as_ref()
                            .and_then(|urls| u32::try_from(urls.len()).ok())
                    }),
                    reference_image_urls: self.reference_image_urls,
                }),
                None => JobState::QueryError {
                    message: "job reported completed without a video_url".to_string(),
                },
            },
            Some(RemoteStatus::Failed) => JobState::Failed {
                error: self
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| JobState::UNKNOWN_ERROR.to_string()),
            },
            None => JobState::QueryError {
                message: format!("unrecognized job status '{}'", self.status),
            },
        };

        JobStatus::new(job_id, state, self.job_type)
    }
}

/// Error payload returned with non-2xx responses
///
/// Different endpoints use different keys; the first one present wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        [self.error, self.detail, self.message]
            .into_iter()
            .flatten()
            .find_map(|value| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) if s.trim().is_empty() => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::GenerationParams;

    fn job() -> JobId {
        JobId::new("abc123")
    }

    #[test]
    fn test_create_body_per_mode() {
        let text = GenerationRequest::text_to_video(
            "A cat playing with a ball",
            GenerationParams::new(Some(10), Some(42)),
        );
        let json = serde_json::to_value(CreateGeneration::from(&text)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "A cat playing with a ball",
                "duration": 10,
                "seed": 42
            })
        );

        let soul = GenerationRequest::soul(
            "Dancing",
            ["https://example.com/a.png", "https://example.com/b.png"],
        );
        let json = serde_json::to_value(CreateGeneration::from(&soul)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "Dancing",
                "reference_image_urls": ["https://example.com/a.png", "https://example.com/b.png"]
            })
        );
    }

    #[test]
    fn test_created_accepts_id_alias() {
        let created: GenerationCreated =
            serde_json::from_str(r#"{"id": "abc123"}"#).unwrap();
        assert_eq!(created.generation_id, "abc123");

        let created: GenerationCreated =
            serde_json::from_str(r#"{"generation_id": "xyz"}"#).unwrap();
        assert_eq!(created.generation_id, "xyz");
    }

    #[test]
    fn test_in_flight_statuses() {
        for (raw, expected) in [
            ("pending", JobState::Pending),
            ("in_queue", JobState::InQueue),
            ("in_progress", JobState::InProgress),
        ] {
            let status = GenerationStatusResponse::new(raw).into_job_status(job());
            assert_eq!(status.state, expected);
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn test_completed_carries_sources() {
        let response: GenerationStatusResponse = serde_json::from_str(
            r#"{
                "status": "completed",
                "type": "soul",
                "video_url": "https://cdn/x.mp4",
                "reference_image_urls": ["https://example.com/a.png", "https://example.com/b.png"]
            }"#,
        )
        .unwrap();

        let status = response.into_job_status(job());
        assert_eq!(status.job_type.as_deref(), Some("soul"));
        match status.state {
            JobState::Completed(output) => {
                assert_eq!(output.video_url, "https://cdn/x.mp4");
                assert_eq!(output.reference_images_count, Some(2));
                assert!(output.image_url.is_none());
            }
            other => panic!("expected completed, got {:?}", other),
        }
    }

    #[test]
    fn test_reported_reference_count_wins() {
        let response = GenerationStatusResponse {
            video_url: Some("https://cdn/x.mp4".to_string()),
            reference_image_urls: Some(vec!["https://example.com/a.png".to_string()]),
            reference_images_count: Some(3),
            ..GenerationStatusResponse::new("completed")
        };

        match response.into_job_status(job()).state {
            JobState::Completed(output) => assert_eq!(output.reference_images_count, Some(3)),
            other => panic!("expected completed, got {:?}", other),
        }
    }

    #[test]
    fn test_completed_without_video_is_query_error() {
        let status = GenerationStatusResponse::new("completed").into_job_status(job());
        assert!(matches!(status.state, JobState::QueryError { .. }));
    }

    #[test]
    fn test_failed_defaults_error() {
        let status = GenerationStatusResponse::new("failed").into_job_status(job());
        assert_eq!(
            status.state,
            JobState::Failed {
                error: "Unknown error".to_string()
            }
        );

        let mut response = GenerationStatusResponse::new("failed");
        response.error = Some("NSFW content".to_string());
        let status = response.into_job_status(job());
        assert_eq!(
            status.state,
            JobState::Failed {
                error: "NSFW content".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognized_status_is_fatal() {
        let status = GenerationStatusResponse::new("exploded").into_job_status(job());
        match status.state {
            JobState::QueryError { message } => assert!(message.contains("exploded")),
            other => panic!("expected query error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_message() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail": "Invalid API key"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid API key"));

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error": null, "message": "quota exceeded"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("quota exceeded"));

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(), None);
    }
}
