//! Operational routes: liveness, database readiness, build version.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Body shared by `/health` and `/ready`; `database` is only reported by `/ready`.
#[derive(Serialize)]
struct ProbeReport {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn liveness() -> Json<ProbeReport> {
    Json(ProbeReport {
        status: "ok",
        database: None,
    })
}

/// 503 while the parts store cannot answer a round-trip.
async fn readiness(State(state): State<AppState>) -> Response {
    match state.parts.ping().await {
        Ok(()) => Json(ProbeReport {
            status: "ok",
            database: Some("ok"),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "parts store not ready");
            let report = ProbeReport {
                status: "degraded",
                database: Some("unavailable"),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(report)).into_response()
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BUILD)
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
