//! Generation request domain types

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Generation mode, one per creation endpoint of the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    TextToVideo,
    ImageToVideo,
    Soul,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextToVideo => "text-to-video",
            Self::ImageToVideo => "image-to-video",
            Self::Soul => "soul",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional numeric knobs shared by every mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Clip length in seconds
    pub duration: Option<u32>,
    pub seed: Option<u64>,
}

impl GenerationParams {
    pub fn new(duration: Option<u32>, seed: Option<u64>) -> Self {
        Self { duration, seed }
    }
}

/// A single video generation task, built once by the caller and consumed by
/// the submitter.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    TextToVideo {
        prompt: String,
        params: GenerationParams,
    },
    ImageToVideo {
        prompt: String,
        image_url: String,
        params: GenerationParams,
    },
    /// Multi-reference composition. Needs at least one reference image.
    SoulMode {
        prompt: String,
        reference_image_urls: Vec<String>,
        params: GenerationParams,
    },
}

/// Reasons a request is refused before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("invalid {field} '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("soul mode requires at least one reference image")]
    MissingReferenceImages,
}

impl GenerationRequest {
    pub fn text_to_video(prompt: impl Into<String>, params: GenerationParams) -> Self {
        Self::TextToVideo {
            prompt: prompt.into(),
            params,
        }
    }

    pub fn image_to_video(
        prompt: impl Into<String>,
        image_url: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self::ImageToVideo {
            prompt: prompt.into(),
            image_url: image_url.into(),
            params,
        }
    }

    pub fn soul<I, S>(prompt: impl Into<String>, reference_image_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SoulMode {
            prompt: prompt.into(),
            reference_image_urls: reference_image_urls.into_iter().map(Into::into).collect(),
            params: GenerationParams::default(),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::TextToVideo { .. } => GenerationMode::TextToVideo,
            Self::ImageToVideo { .. } => GenerationMode::ImageToVideo,
            Self::SoulMode { .. } => GenerationMode::Soul,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::TextToVideo { prompt, .. }
            | Self::ImageToVideo { prompt, .. }
            | Self::SoulMode { prompt, .. } => prompt,
        }
    }

    pub fn params(&self) -> GenerationParams {
        match self {
            Self::TextToVideo { params, .. }
            | Self::ImageToVideo { params, .. }
            | Self::SoulMode { params, .. } => *params,
        }
    }

    /// Checks the input constraints of every mode.
    ///
    /// URLs are only checked syntactically; reachability is the remote's
    /// concern.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt().trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        match self {
            Self::TextToVideo { .. } => Ok(()),
            Self::ImageToVideo { image_url, .. } => check_url("image_url", image_url),
            Self::SoulMode {
                reference_image_urls,
                ..
            } => {
                if reference_image_urls.is_empty() {
                    return Err(ValidationError::MissingReferenceImages);
                }
                reference_image_urls
                    .iter()
                    .try_for_each(|url| check_url("reference image url", url))
            }
        }
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_is_valid() {
        let req = GenerationRequest::text_to_video(
            "A cat playing with a ball",
            GenerationParams::new(Some(10), Some(42)),
        );
        assert_eq!(req.mode(), GenerationMode::TextToVideo);
        assert_eq!(req.params().seed, Some(42));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let req = GenerationRequest::text_to_video("   ", GenerationParams::default());
        assert_eq!(req.validate(), Err(ValidationError::EmptyPrompt));
    }

    #[test]
    fn test_image_url_must_parse() {
        let req = GenerationRequest::image_to_video(
            "The dog runs in the park",
            "my-dog.jpg",
            GenerationParams::default(),
        );
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidUrl {
                field: "image_url",
                ..
            })
        ));

        let req = GenerationRequest::image_to_video(
            "The dog runs in the park",
            "https://example.com/my-dog.jpg",
            GenerationParams::default(),
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_soul_needs_references() {
        let empty: Vec<String> = Vec::new();
        let req = GenerationRequest::soul("Dancing together", empty);
        assert_eq!(
            req.validate(),
            Err(ValidationError::MissingReferenceImages)
        );

        let req = GenerationRequest::soul(
            "Dancing together",
            ["https://example.com/a.png", "not a url"],
        );
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_soul_keeps_reference_order() {
        let req = GenerationRequest::soul(
            "Dancing together",
            ["https://example.com/b.png", "https://example.com/a.png"],
        );
        match req {
            GenerationRequest::SoulMode {
                reference_image_urls,
                ..
            } => assert_eq!(
                reference_image_urls,
                vec!["https://example.com/b.png", "https://example.com/a.png"]
            ),
            other => panic!("unexpected request {:?}", other),
        }
    }
}
