pub mod docs;
pub mod satellite;

use axum::Router;

use crate::state::AppState;

/// All public routes, mounted at the root.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(docs::router())
        .merge(satellite::router())
}
