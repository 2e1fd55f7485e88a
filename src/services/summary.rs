//! Dashboard summary service.
//!
//! Fetch-once counterpart to the streaming chat service: posts the
//! current dashboard dataset and receives one finished summary back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::BrandIntelConfig;
use crate::errors::{BrandIntelError, BrandIntelResult};
use crate::resilience::SingleFlight;

const FALLBACK_REQUEST_ERROR: &str = "Failed to generate AI summary";
const FALLBACK_STATUS_ERROR: &str = "Failed to generate summary";

/// Request body for the dashboard summary endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    /// The dashboard's current dataset, passed through opaquely.
    pub dashboard_data: serde_json::Value,
    /// The brand the dashboard is filtered to.
    pub brand: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Dashboard summary service.
///
/// Summary generation is expensive server-side and the result is
/// idempotent for a given dataset, so overlapping requests are refused:
/// at most one `generate` call runs at a time per service, enforced by a
/// [`SingleFlight`] latch. A second caller gets
/// [`BrandIntelError::InFlight`] immediately instead of queueing.
pub struct SummaryService {
    http: reqwest::Client,
    config: Arc<BrandIntelConfig>,
    guard: SingleFlight,
}

impl SummaryService {
    pub(crate) fn new(http: reqwest::Client, config: Arc<BrandIntelConfig>) -> Self {
        Self {
            http,
            config,
            guard: SingleFlight::new(),
        }
    }

    /// Returns true if a summary request is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.guard.is_in_flight()
    }

    /// Generates an AI summary of the given dashboard data.
    ///
    /// # Errors
    ///
    /// - [`BrandIntelError::InFlight`] if another summary request is
    ///   already running
    /// - [`BrandIntelError::Network`] if the request fails to complete
    /// - [`BrandIntelError::Server`] on a non-success status (using the
    ///   error body's `detail` field when present) or when the response
    ///   reports `status: "error"` (using its `message` field)
    /// - [`BrandIntelError::Serialization`] if a success body cannot be
    ///   decoded or is missing its `summary`
    #[instrument(skip(self, dashboard_data), fields(brand = %brand))]
    pub async fn generate(
        &self,
        dashboard_data: serde_json::Value,
        brand: &str,
    ) -> BrandIntelResult<String> {
        let _guard = self.guard.try_begin().ok_or(BrandIntelError::InFlight)?;

        let request = SummaryRequest {
            dashboard_data,
            brand: brand.to_string(),
        };

        let response = self
            .http
            .post(self.config.endpoint_url("ai/dashboard-summary"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            tracing::warn!(status = status.as_u16(), ?detail, "Summary request rejected");
            return Err(BrandIntelError::Server {
                message: detail.unwrap_or_else(|| FALLBACK_REQUEST_ERROR.to_string()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| BrandIntelError::Stream {
            message: e.to_string(),
        })?;
        let body: SummaryResponse = serde_json::from_slice(&bytes)?;

        if body.status.as_deref() == Some("error") {
            return Err(BrandIntelError::Server {
                message: body
                    .message
                    .unwrap_or_else(|| FALLBACK_STATUS_ERROR.to_string()),
            });
        }

        body.summary.ok_or_else(|| BrandIntelError::Serialization {
            message: "Response missing summary field".to_string(),
        })
    }
}
