//! HTTP client for the satellite telemetry endpoint.

use std::time::Duration;

use async_trait::async_trait;

use crate::payload::{decode, TelemetryReading};
use crate::{TelemetryError, TelemetrySource};

/// Default bound on a single upstream request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the current reading from a configured telemetry URL.
///
/// One request per call, no retries. Retrying is left to the caller's
/// schedule.
#[derive(Debug, Clone)]
pub struct SatelliteClient {
    client: reqwest::Client,
    url: String,
}

impl SatelliteClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TelemetrySource for SatelliteClient {
    async fn fetch_reading(&self) -> Result<Option<TelemetryReading>, TelemetryError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelemetryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| TelemetryError::Parse(e.to_string()))?;

        let reading = decode(body)?;
        match &reading {
            Some(r) => tracing::debug!(
                url = %self.url,
                timestamp = %r.timestamp,
                altitude = r.altitude,
                "Fetched telemetry reading"
            ),
            None => tracing::debug!(url = %self.url, "Telemetry endpoint returned no data"),
        }
        Ok(reading)
    }
}
