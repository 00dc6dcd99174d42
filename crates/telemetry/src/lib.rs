//! Upstream satellite telemetry.
//!
//! [`TelemetrySource`] is the seam the monitor depends on.
//! [`client::SatelliteClient`] implements it over HTTP; [`payload`] holds
//! the wire format and its normalization into naive-UTC readings.

pub mod client;
pub mod payload;

use async_trait::async_trait;
use moonlease_core::error::CoreError;

pub use client::SatelliteClient;
pub use payload::TelemetryReading;

/// Errors from fetching or decoding one upstream reading.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Telemetry endpoint error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected JSON shape.
    #[error("Malformed telemetry payload: {0}")]
    Parse(String),

    /// A field was present but its value could not be normalized.
    #[error("Invalid telemetry value: {0}")]
    Normalize(#[from] CoreError),
}

/// Something that can produce the current upstream reading.
///
/// `Ok(None)` means the source answered but had no data.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn fetch_reading(&self) -> Result<Option<TelemetryReading>, TelemetryError>;
}
