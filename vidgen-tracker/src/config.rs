//! Tracker configuration
//!
//! Defines the polling cadence and the budgets that bound how long a single
//! job may be tracked.

use std::time::Duration;

/// Default wait between two status queries of the same job
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Tracker configuration
///
/// All intervals and budgets are configurable to allow tuning for different
/// remote services (fast preview models vs long renders).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// How long to wait between status queries while a job is in flight
    pub poll_interval: Duration,

    /// Maximum number of status queries per job (None = unbounded)
    pub max_attempts: Option<u32>,

    /// Wall-clock budget for tracking one job, measured from the first query
    pub timeout: Option<Duration>,

    /// How many times a failed status query is repeated before giving up
    pub query_retries: u32,

    /// Backoff before the first repeated query
    pub retry_initial_delay: Duration,

    /// Upper bound for the backoff between repeated queries
    pub retry_max_delay: Duration,
}

impl TrackerConfig {
    /// Creates a configuration with the given interval and no budgets
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            max_attempts: None,
            timeout: None,
            query_retries: 0,
            retry_initial_delay: Duration::from_millis(500),
            retry_max_delay: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - POLL_INTERVAL (seconds, default: 10)
    /// - MAX_POLL_ATTEMPTS (default: unbounded)
    /// - POLL_TIMEOUT (seconds, default: unbounded)
    /// - QUERY_RETRIES (default: 0)
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = env_number::<u64>("POLL_INTERVAL")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        config.max_attempts = env_number::<u32>("MAX_POLL_ATTEMPTS")?;
        config.timeout = env_number::<u64>("POLL_TIMEOUT")?.map(Duration::from_secs);
        if let Some(retries) = env_number::<u32>("QUERY_RETRIES")? {
            config.query_retries = retries;
        }

        Ok(config)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_query_retries(mut self, retries: u32) -> Self {
        self.query_retries = retries;
        self
    }

    /// Backoff before retry number `retry` (1-based), doubling each time
    pub fn retry_delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.retry_initial_delay
            .saturating_mul(factor)
            .min(self.retry_max_delay)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == Some(0) {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.retry_initial_delay > self.retry_max_delay {
            anyhow::bail!("retry_initial_delay must not exceed retry_max_delay");
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

fn env_number<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", key, raw, e)),
        Err(_) => Ok(None),
    }
}
