//! Altitude value parsing and windowed aggregation.

use serde::Serialize;

use crate::error::CoreError;

/// Min / max / average over a window of altitude readings.
///
/// The numeric fields are `None` only for an empty window, which the
/// monitor produces solely when it could neither read nor fetch any data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltitudeStats {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub average: Option<f64>,
    /// Altitudes the aggregate was computed over, newest first.
    pub altitudes: Vec<f64>,
    pub count: usize,
}

impl AltitudeStats {
    /// Aggregate the given altitudes.
    pub fn from_altitudes(altitudes: Vec<f64>) -> Self {
        if altitudes.is_empty() {
            return Self::empty();
        }

        let minimum = altitudes.iter().copied().fold(f64::INFINITY, f64::min);
        let maximum = altitudes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = altitudes.iter().sum::<f64>() / altitudes.len() as f64;

        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
            average: Some(average),
            count: altitudes.len(),
            altitudes,
        }
    }

    /// Override `count`, e.g. with the size of the window the altitudes
    /// were drawn from.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Aggregate with no data points.
    pub fn empty() -> Self {
        Self {
            minimum: None,
            maximum: None,
            average: None,
            altitudes: Vec::new(),
            count: 0,
        }
    }
}

/// Smallest altitude in the window, or `None` when it is empty.
pub fn window_minimum(altitudes: &[f64]) -> Option<f64> {
    altitudes.iter().copied().reduce(f64::min)
}

/// Parse an altitude from its upstream string form.
pub fn parse_altitude(raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidAltitude(format!("not a number: {raw:?}")))?;
    check_altitude(value)
}

/// Reject NaN and infinities.
pub fn check_altitude(value: f64) -> Result<f64, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::InvalidAltitude(format!("not finite: {value}")))
    }
}
