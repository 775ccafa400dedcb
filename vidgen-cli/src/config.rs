//! Configuration module
//!
//! Handles CLI configuration: API endpoint, credential and tracking
//! parameters.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use vidgen_client::{GenerationApi, GenerationClient};
use vidgen_tracker::{GenerationTracker, JobSubmitter, StatusPoller, TrackerConfig};

/// Default base URL of the generation API
pub const DEFAULT_API_URL: &str = "https://platform.higgsfield.ai";

/// Per-request HTTP timeout
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Flags overriding the environment-derived tracker configuration
#[derive(Args, Debug, Default, Clone)]
pub struct TrackingArgs {
    /// Seconds between status queries
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    /// Give up after this many status queries
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Give up after this many seconds of tracking a job
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Repeat a failed status query this many times before giving up
    #[arg(long, global = true)]
    pub query_retries: Option<u32>,
}

impl TrackingArgs {
    /// Applies the flags that were given on top of `config`
    pub fn apply(&self, mut config: TrackerConfig) -> TrackerConfig {
        if let Some(secs) = self.poll_interval {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_attempts {
            config.max_attempts = Some(max);
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(retries) = self.query_retries {
            config.query_retries = retries;
        }
        config
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the generation API
    pub api_url: String,
    /// API credential
    pub api_key: String,
    /// Polling parameters
    pub tracker: TrackerConfig,
}

impl Config {
    /// Builds and validates the configuration
    ///
    /// Fails when no API key was supplied by flag, environment or `.env`.
    pub fn load(api_url: String, api_key: Option<String>, tracking: &TrackingArgs) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .context(
                "HIGGSFIELD_API_KEY not found in environment variables. \
                 Create a .env file containing HIGGSFIELD_API_KEY=your_api_key_here \
                 or pass --api-key",
            )?;

        let parsed = reqwest::Url::parse(&api_url)
            .with_context(|| format!("Invalid api_url '{}'", api_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("api_url must use http or https, got '{}'", parsed.scheme());
        }

        let tracker = tracking.apply(TrackerConfig::from_env()?);
        tracker.validate().context("Invalid tracking configuration")?;

        Ok(Self {
            api_url,
            api_key,
            tracker,
        })
    }

    /// Creates the HTTP client for the configured endpoint
    pub fn client(&self) -> Result<GenerationClient> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GenerationClient::with_client(
            &self.api_url,
            &self.api_key,
            http,
        ))
    }

    /// Wires a tracker around a fresh client
    pub fn tracker(&self) -> Result<GenerationTracker> {
        let api: Arc<dyn GenerationApi> = Arc::new(self.client()?);
        Ok(GenerationTracker::new(
            JobSubmitter::new(api.clone()),
            StatusPoller::new(self.tracker.clone(), api),
        ))
    }
}
