//! Upstream telemetry wire format.
//!
//! ```json
//! { "last_updated": "2022-07-27T04:49:37.681136Z", "altitude": "213.001" }
//! ```
//!
//! `altitude` may be a number or a numeric string. Unknown fields are ignored.

use moonlease_core::altitude::{check_altitude, parse_altitude};
use moonlease_core::timestamp::normalize_timestamp;
use moonlease_core::types::Timestamp;
use serde::Deserialize;

use crate::TelemetryError;

/// Raw payload as sent by the telemetry endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryPayload {
    pub last_updated: String,
    pub altitude: AltitudeField,
}

/// Altitude as either a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AltitudeField {
    Number(f64),
    Text(String),
}

/// A reading normalized to the domain's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryReading {
    /// Naive UTC.
    pub timestamp: Timestamp,
    pub altitude: f64,
}

impl TelemetryPayload {
    /// Normalize timestamp and altitude.
    pub fn normalize(&self) -> Result<TelemetryReading, TelemetryError> {
        let timestamp = normalize_timestamp(&self.last_updated)?;
        let altitude = match &self.altitude {
            AltitudeField::Number(value) => check_altitude(*value)?,
            AltitudeField::Text(raw) => parse_altitude(raw)?,
        };
        Ok(TelemetryReading {
            timestamp,
            altitude,
        })
    }
}

/// Decode a JSON body into a reading.
///
/// `null` and `{}` mean the upstream had nothing to report.
pub fn decode(body: serde_json::Value) -> Result<Option<TelemetryReading>, TelemetryError> {
    let is_empty = match &body {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Ok(None);
    }

    let payload: TelemetryPayload =
        serde_json::from_value(body).map_err(|e| TelemetryError::Parse(e.to_string()))?;
    payload.normalize().map(Some)
}
