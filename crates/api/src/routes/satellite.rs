//! Route definitions for altitude statistics and health.
//!
//! ```text
//! GET /stats     get_stats
//! GET /health    get_health
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::satellite;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(satellite::get_stats))
        .route("/health", get(satellite::get_health))
}
