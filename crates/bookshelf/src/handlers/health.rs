//! Health check endpoints.
//!
//! - `/livez` - liveness probe (immediate 200, no checks)
//! - `/healthz` - cache counters

use axum::{extract::State, http::StatusCode, Json};

use crate::openapi::HealthView;
use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[utoipa::path(
    get,
    path = "/livez",
    tag = "system",
    responses((status = 200, description = "Process is up"))
)]
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache statistics. Passive, touches no storage.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "system",
    responses((status = 200, description = "Cache counters", body = HealthView))
)]
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "cache": state.cache.stats(),
    }))
}
