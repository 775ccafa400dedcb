//! Error types for the generation client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the generation API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether repeating the same request could plausibly succeed
    ///
    /// Transport failures and 5xx/429 responses are transient; anything the
    /// server rejected on its merits is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_) => true,
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::ParseError(_) | Self::InvalidRequest(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = ClientError::api_error(404, "no such generation");
        assert!(!not_found.is_server_error());
        assert!(!not_found.is_transient());

        let unavailable = ClientError::api_error(503, "busy");
        assert!(unavailable.is_server_error());
        assert!(unavailable.is_transient());

        assert!(ClientError::api_error(429, "slow down").is_transient());
        assert!(!ClientError::ParseError("bad json".to_string()).is_transient());
    }

    #[test]
    fn test_display_includes_message() {
        let err = ClientError::api_error(401, "Invalid API key");
        assert_eq!(err.to_string(), "API error (status 401): Invalid API key");
    }
}
