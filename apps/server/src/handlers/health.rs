//! Liveness and database diagnostics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use shoelab_db::TableStatus;
use tracing::warn;

use crate::error::ApiResult;
use crate::AppState;

/// `GET /healthz`: `ok` while the database answers, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "ok")
    } else {
        warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    }
}

/// `GET /debug/db`: whether the shoes table exists and how many rows it has.
pub async fn debug_db(State(state): State<AppState>) -> ApiResult<Json<TableStatus>> {
    let status = state.db.table_status().await?;
    Ok(Json(status))
}
