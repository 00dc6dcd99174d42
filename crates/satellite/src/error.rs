use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced by the fake satellite endpoints.
#[derive(Debug, thiserror::Error)]
pub enum SatelliteError {
    /// Reading or writing the state directory failed.
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `/move/{direction}` got something that is neither `up`, `down` nor a number.
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// `/data/{date}/{altitude}` got an altitude that is not a finite number.
    #[error("Invalid altitude: {0}")]
    InvalidAltitude(String),
}

impl IntoResponse for SatelliteError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            SatelliteError::Io(err) => {
                tracing::error!(error = %err, "State I/O failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            SatelliteError::InvalidDirection(_) | SatelliteError::InvalidAltitude(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}
