use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use moonlease_core::altitude::parse_altitude;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::SatelliteError;
use crate::generator::{GeneratedReading, ReadingRequest, MOVE_STEP, NUDGE_STEP};
use crate::state::StateDir;

/// Upstream payload in the shape the monitor consumes.
#[derive(Debug, Serialize)]
pub struct SatelliteData {
    pub last_updated: String,
    /// Stringified, as the real feed sends it.
    pub altitude: String,
    pub source: String,
}

impl From<GeneratedReading> for SatelliteData {
    fn from(reading: GeneratedReading) -> Self {
        Self {
            last_updated: reading.last_updated,
            altitude: reading.altitude.to_string(),
            source: reading.source.to_string(),
        }
    }
}

type DataResult = Result<Json<SatelliteData>, SatelliteError>;

async fn respond(state: &StateDir, request: ReadingRequest) -> DataResult {
    let reading = state.next_reading(request).await?;
    Ok(Json(reading.into()))
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "/api/satellite/data" }))
}

/// GET /api/satellite/data
pub async fn data(State(state): State<Arc<StateDir>>) -> DataResult {
    respond(&state, ReadingRequest::random_walk()).await
}

/// GET /api/satellite/up
pub async fn up(State(state): State<Arc<StateDir>>) -> DataResult {
    respond(&state, ReadingRequest::nudge(NUDGE_STEP)).await
}

/// GET /api/satellite/down
pub async fn down(State(state): State<Arc<StateDir>>) -> DataResult {
    respond(&state, ReadingRequest::nudge(-NUDGE_STEP)).await
}

/// GET /api/satellite/move/{direction}
pub async fn move_by(
    State(state): State<Arc<StateDir>>,
    Path(direction): Path<String>,
) -> DataResult {
    let direction = parse_direction(&direction)?;
    respond(&state, ReadingRequest::exact_move(direction)).await
}

/// GET /api/satellite/data/{date_str}/{altitude}
pub async fn explicit(
    State(state): State<Arc<StateDir>>,
    Path((date_str, altitude)): Path<(String, String)>,
) -> DataResult {
    let altitude =
        parse_altitude(&altitude).map_err(|_| SatelliteError::InvalidAltitude(altitude))?;
    respond(&state, ReadingRequest::explicit(date_str, altitude)).await
}

/// `up` and `down` map to fixed steps; anything else must be a finite number.
pub fn parse_direction(raw: &str) -> Result<f64, SatelliteError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("up") {
        return Ok(MOVE_STEP);
    }
    if trimmed.eq_ignore_ascii_case("down") {
        return Ok(-MOVE_STEP);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| SatelliteError::InvalidDirection(raw.to_string()))
}
