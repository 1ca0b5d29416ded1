use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::platform::models::{PlatformOutcome, PlatformQueryParameters, PlatformReading};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Platform request cancelled")]
    Cancelled,
}

/// Read-only client for the telemetry platform API.
///
/// Every call is a single attempt. Nothing is retried or cached.
pub struct PlatformClient {
    http_client: Client,
}

impl PlatformClient {
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.platform_timeout_seconds))
            .build()?;

        Ok(Self { http_client })
    }

    /// Query `endpoint` with `params` and classify the answer.
    ///
    /// Remote statuses are returned as-is. Transport failures, timeouts and
    /// bodies that are not a [`PlatformReading`] all become
    /// [`PlatformOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Cancelled` if `cancel` fires before the
    /// response is complete. The outbound request is dropped.
    pub async fn fetch_platform_data(
        &self,
        endpoint: &str,
        params: &PlatformQueryParameters,
        cancel: &CancellationToken,
    ) -> Result<PlatformOutcome, PlatformError> {
        let url = match build_url(endpoint, params) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode platform query parameters");
                return Ok(PlatformOutcome::Failed);
            }
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(%url, "Platform request cancelled");
                Err(PlatformError::Cancelled)
            }
            outcome = self.request(&url) => Ok(outcome),
        }
    }

    async fn request(&self, url: &str) -> PlatformOutcome {
        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, %url, "Platform API request failed");
                return PlatformOutcome::Failed;
            }
        };

        let status = response.status();
        if !status.is_success() || status == StatusCode::NO_CONTENT {
            if !status.is_success() {
                tracing::error!(%status, %url, "Platform API returned an error status");
            }
            return PlatformOutcome::Upstream(status);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, %url, "Failed to read platform response body");
                return PlatformOutcome::Failed;
            }
        };

        match serde_json::from_str::<PlatformReading>(&text) {
            Ok(reading) => PlatformOutcome::Reading { status, reading },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body_preview = %text.chars().take(500).collect::<String>(),
                    "Failed to parse platform response"
                );
                PlatformOutcome::Failed
            }
        }
    }
}

/// Append the set fields of `params` to `endpoint` as a query string.
///
/// # Errors
///
/// Returns the encoder error if a field cannot be represented as a query value.
pub fn build_url(
    endpoint: &str,
    params: &PlatformQueryParameters,
) -> Result<String, serde_urlencoded::ser::Error> {
    let query = serde_urlencoded::to_string(params)?;

    if query.is_empty() {
        return Ok(endpoint.to_string());
    }

    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{endpoint}{separator}{query}"))
}
