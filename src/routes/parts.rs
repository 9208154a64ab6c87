//! `/parts` routes, nested under `/api` by [`super::app_router`].

use crate::handlers::parts::{api_not_found, create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn part_routes(state: AppState) -> Router {
    Router::new()
        .route("/parts", get(list).post(create).fallback(api_not_found))
        .route(
            "/parts/:id",
            get(read).put(update).delete(delete_handler).fallback(api_not_found),
        )
        .fallback(api_not_found)
        .with_state(state)
}
