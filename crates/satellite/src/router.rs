use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::state::StateDir;

/// Build the fake satellite router.
///
/// ```text
/// GET /                                          root
/// GET /api/satellite/data                        data
/// GET /api/satellite/up                          up
/// GET /api/satellite/down                        down
/// GET /api/satellite/move/{direction}            move_by
/// GET /api/satellite/data/{date_str}/{altitude}  explicit
/// ```
pub fn build_router(state: Arc<StateDir>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/satellite/data", get(handlers::data))
        .route("/api/satellite/up", get(handlers::up))
        .route("/api/satellite/down", get(handlers::down))
        .route("/api/satellite/move/{direction}", get(handlers::move_by))
        .route(
            "/api/satellite/data/{date_str}/{altitude}",
            get(handlers::explicit),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
