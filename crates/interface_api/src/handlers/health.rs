//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use core_kernel::{AdapterHealth, HealthCheckResult};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the benefit source)
///
/// An unauthorized session is reported as degraded but still ready.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthCheckResult>) {
    let result = state.benefits.health_check().await;
    let status = match result.status {
        AdapterHealth::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (status, Json(result))
}
