//! Health Check Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe: verifies the database answers
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<HealthData>>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(ok(
        "Service healthy.",
        HealthData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    ))
}
