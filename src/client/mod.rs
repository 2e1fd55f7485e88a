//! BrandIntel API client.
//!
//! Provides the main client interface for the dashboard AI endpoints.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{BrandIntelConfig, BrandIntelConfigBuilder};
use crate::errors::{BrandIntelError, BrandIntelResult};
use crate::services::{ChatService, SummaryService};

/// The main BrandIntel client.
///
/// Provides access to the streaming chat and dashboard summary services.
/// Cheap to share behind an `Arc`; the underlying connection pool is
/// reused across services and calls.
///
/// # Example
///
/// ```rust,no_run
/// use brandintel_client::BrandIntelClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BrandIntelClient::from_env()?;
///
///     client
///         .chat()
///         .send_message("How is Acme trending on social?", |chunk| {
///             print!("{}", chunk);
///         })
///         .await?;
///     Ok(())
/// }
/// ```
pub struct BrandIntelClient {
    config: Arc<BrandIntelConfig>,
    chat_service: ChatService,
    summary_service: SummaryService,
}

impl BrandIntelClient {
    /// Creates a new client builder.
    pub fn builder() -> BrandIntelClientBuilder {
        BrandIntelClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `API_BASE_URL` (defaulting to `http://localhost:8000/api`)
    /// and optionally `API_TIMEOUT`.
    pub fn from_env() -> BrandIntelResult<Self> {
        BrandIntelClientBuilder::from_config(BrandIntelConfig::from_env()?).build()
    }

    /// Creates a client from an existing configuration.
    pub fn with_config(config: BrandIntelConfig) -> BrandIntelResult<Self> {
        BrandIntelClientBuilder::from_config(config).build()
    }

    /// Returns the streaming chat service.
    pub fn chat(&self) -> &ChatService {
        &self.chat_service
    }

    /// Returns the dashboard summary service.
    pub fn summary(&self) -> &SummaryService {
        &self.summary_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BrandIntelConfig {
        &self.config
    }
}

impl std::fmt::Debug for BrandIntelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandIntelClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the BrandIntel client.
#[derive(Debug, Default)]
pub struct BrandIntelClientBuilder {
    config_builder: BrandIntelConfigBuilder,
    config: Option<BrandIntelConfig>,
    http: Option<reqwest::Client>,
}

impl BrandIntelClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with an existing configuration.
    pub fn from_config(config: BrandIntelConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the whole-request timeout.
    ///
    /// Applies to the summary request and to the initial chat request;
    /// streaming reads are open-ended unless the caller races the
    /// operation against a timer.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Supplies a pre-configured `reqwest` client instead of building one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the client.
    pub fn build(self) -> BrandIntelResult<BrandIntelClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };
        let config = Arc::new(config);

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    BrandIntelError::configuration(format!("Failed to build HTTP client: {}", e))
                })?
            }
        };

        Ok(BrandIntelClient {
            chat_service: ChatService::new(http.clone(), Arc::clone(&config)),
            summary_service: SummaryService::new(http, Arc::clone(&config)),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder_defaults() {
        let client = BrandIntelClient::builder().build().unwrap();
        assert_eq!(client.config().base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_client_builder_custom_base_url() {
        let client = BrandIntelClient::builder()
            .base_url("http://dashboard.internal:8000/api")
            .build()
            .unwrap();
        assert_eq!(
            client.config().base_url,
            "http://dashboard.internal:8000/api"
        );
    }

    #[test]
    fn test_client_debug_shows_config_only() {
        let client = BrandIntelClient::builder().build().unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("BrandIntelClient"));
        assert!(debug.contains("localhost:8000"));
    }
}
