use axum::routing::get;
use axum::Router;

use crate::handlers::docs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(docs::root))
        .route("/docs", get(docs::list_endpoints))
}
