//! Configuration for the BrandIntel client.
//!
//! The dashboard API is typically a local deployment, so the only required
//! setting is the base URL, which defaults to the development backend.

use std::time::Duration;

use crate::errors::{BrandIntelError, BrandIntelResult};

/// Default base URL for the dashboard API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the BrandIntel client.
#[derive(Debug, Clone)]
pub struct BrandIntelConfig {
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Optional whole-request timeout.
    ///
    /// `None` (the default) imposes no timeout: streaming chat responses
    /// are open-ended and callers wanting a deadline should race the
    /// operation against a timer instead.
    pub timeout: Option<Duration>,
}

impl BrandIntelConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> BrandIntelConfigBuilder {
        BrandIntelConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `API_BASE_URL` (optional): base URL, defaults to
    ///   `http://localhost:8000/api`
    /// - `API_TIMEOUT` (optional): whole-request timeout in seconds
    pub fn from_env() -> BrandIntelResult<Self> {
        let mut builder = BrandIntelConfigBuilder::new();

        if let Ok(base_url) = std::env::var("API_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("API_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                BrandIntelError::configuration(format!(
                    "API_TIMEOUT is not a valid integer: {}",
                    timeout_str
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        builder.build()
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for BrandIntelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Builder for `BrandIntelConfig`.
#[derive(Debug, Default)]
pub struct BrandIntelConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl BrandIntelConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> BrandIntelResult<BrandIntelConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // Reject URLs reqwest would fail on much later, with a worse message.
        let parsed = url::Url::parse(&base_url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(BrandIntelError::configuration(format!(
                "Base URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        Ok(BrandIntelConfig {
            base_url,
            timeout: self.timeout,
        })
    }
}
