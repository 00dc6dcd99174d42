//! Random-walk altitude generation.
//!
//! Pure functions over an injected [`Rng`], so the walk is reproducible under
//! a seeded generator. File handling lives in [`crate::state`].

use std::fmt;

use moonlease_core::timestamp::format_utc;
use moonlease_core::types::Timestamp;
use rand::Rng;

/// Altitude reported before any reading has been stored.
pub const DEFAULT_ALTITUDE: f64 = 213.001;

/// Noise applied to random-walk steps.
pub const DEFAULT_SIGMA: f64 = 20.0;

/// Step taken by `/api/satellite/up` and `/api/satellite/down`.
pub const NUDGE_STEP: f64 = 10.0;

/// Step taken by `/api/satellite/move/up` and `/api/satellite/move/down`.
pub const MOVE_STEP: f64 = 15.0;

/// Chance (out of 101, inclusive draw `0..=100`) that an undirected walk
/// takes a step instead of repeating the previous reading.
const STEP_THRESHOLD: u32 = 95;

/// How a reading came about. Rendered into the `source` response field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingSource {
    /// Altitude supplied by the caller.
    Given,
    /// No previous reading; started from [`DEFAULT_ALTITUDE`].
    Default,
    /// Previous reading repeated unchanged.
    Held,
    /// Previous altitude moved by the given direction (plus noise).
    Direction(f64),
}

impl fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Given => f.write_str("given"),
            Self::Default => f.write_str("default"),
            Self::Held => f.write_str("calc"),
            Self::Direction(d) => write!(f, "direction:{d}"),
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    /// Raw timestamp string; empty, `now` or `0` mean the current time.
    pub timestamp: Option<String>,
    /// Explicit altitude; skips the walk entirely.
    pub altitude: Option<f64>,
    pub direction: f64,
    pub sigma: f64,
}

impl ReadingRequest {
    /// Undirected step with the default noise.
    pub fn random_walk() -> Self {
        Self::nudge(0.0)
    }

    /// Directed step with the default noise.
    pub fn nudge(direction: f64) -> Self {
        Self {
            timestamp: None,
            altitude: None,
            direction,
            sigma: DEFAULT_SIGMA,
        }
    }

    /// Exact directed step, no noise.
    pub fn exact_move(direction: f64) -> Self {
        Self {
            timestamp: None,
            altitude: None,
            direction,
            sigma: 0.0,
        }
    }

    /// Caller-supplied timestamp and altitude.
    pub fn explicit(timestamp: impl Into<String>, altitude: f64) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            altitude: Some(altitude),
            direction: 0.0,
            sigma: 0.0,
        }
    }
}

/// The persisted part of a reading: what the next step starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReading {
    pub last_updated: String,
    pub altitude: f64,
}

impl StoredReading {
    /// Parse a state line `"<last_updated> <altitude> [<source>]"`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let last_updated = parts.next()?.to_string();
        let altitude: f64 = parts.next()?.parse().ok()?;
        altitude.is_finite().then_some(Self {
            last_updated,
            altitude,
        })
    }
}

/// A freshly generated reading.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReading {
    pub last_updated: String,
    pub altitude: f64,
    pub source: ReadingSource,
}

impl GeneratedReading {
    /// Line written to the state file (only the latest reading is kept).
    pub fn state_line(&self) -> String {
        format!("{} {} {}", self.last_updated, self.altitude, self.source)
    }

    /// Line appended to the readings log.
    pub fn log_line(&self) -> String {
        format!("{} {:012.8} {}\n", self.last_updated, self.altitude, self.source)
    }
}

/// Produce the next reading.
///
/// An explicit altitude wins. Without a previous reading the walk starts at
/// [`DEFAULT_ALTITUDE`]. Otherwise a directed request always steps, and an
/// undirected one steps with ~95% probability; a step is stamped `now`,
/// while a skipped step repeats the previous reading verbatim.
pub fn generate<R: Rng>(
    previous: Option<&StoredReading>,
    request: &ReadingRequest,
    now: Timestamp,
    rng: &mut R,
) -> GeneratedReading {
    let (timestamp, altitude, source) = match (request.altitude, previous) {
        (Some(altitude), _) => (request.timestamp.clone(), altitude, ReadingSource::Given),
        (None, None) => (
            request.timestamp.clone(),
            DEFAULT_ALTITUDE,
            ReadingSource::Default,
        ),
        (None, Some(prev)) => {
            if request.direction != 0.0 || rng.random_range(0..=100u32) < STEP_THRESHOLD {
                let mut altitude = prev.altitude + request.direction;
                if request.sigma > 0.0 {
                    altitude = gaussian(rng, altitude, request.sigma);
                }
                (None, altitude, ReadingSource::Direction(request.direction))
            } else {
                (
                    Some(prev.last_updated.clone()),
                    prev.altitude,
                    ReadingSource::Held,
                )
            }
        }
    };

    GeneratedReading {
        last_updated: resolve_timestamp(timestamp.as_deref(), now),
        altitude,
        source,
    }
}

/// Empty, `now` and `0` stand for the current UTC time.
pub fn resolve_timestamp(raw: Option<&str>, now: Timestamp) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() && !s.eq_ignore_ascii_case("now") && s != "0" => s.to_string(),
        _ => format_utc(&now),
    }
}

/// Draw from a normal distribution (Box-Muller).
pub fn gaussian<R: Rng>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    // `random` yields [0, 1); flip it so the log argument is never zero.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + sigma * z
}
