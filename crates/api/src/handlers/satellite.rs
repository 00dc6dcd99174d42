use axum::extract::State;
use axum::Json;
use moonlease_core::altitude::AltitudeStats;
use moonlease_core::health::HealthStatus;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats -- min / max / average altitude over the last five minutes.
pub async fn get_stats(State(state): State<AppState>) -> Json<DataResponse<AltitudeStats>> {
    let stats = state.monitor.stats().await;
    Json(DataResponse { data: stats })
}

/// GET /health -- altitude health message.
pub async fn get_health(State(state): State<AppState>) -> Json<DataResponse<HealthStatus>> {
    let status = state.monitor.health().await;
    Json(DataResponse { data: status })
}
