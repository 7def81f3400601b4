use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub api: &'static str,
    pub db: &'static str,
}

/// Readiness probe: the API answers and the credential store is reachable.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { api: "ok", db: "ok" })),
        Err(e) => {
            warn!(error = ?e, "store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { api: "ok", db: "fail" }),
            )
        }
    }
}

pub async fn root() -> &'static str {
    "credential service running"
}
