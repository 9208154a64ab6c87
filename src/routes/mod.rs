//! Router assembly: operational routes, the `/api` surface, and the static frontend.

mod common;
mod parts;
pub use common::common_routes;
pub use parts::part_routes;

use crate::state::AppState;
use axum::Router;
use std::path::Path;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Full application router. Paths outside `/api` and the operational routes are served from `static_dir`.
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", part_routes(state))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
