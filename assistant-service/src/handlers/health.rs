use crate::dtos::HealthResponse;
use crate::services::get_metrics;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Message reported by the liveness check.
pub const RUNNING_MESSAGE: &str = "SealVault assistant server is running";

/// Liveness probe. Touches no dependency, so it answers while the process is up.
pub async fn health_check() -> Json<HealthResponse> {
    tracing::info!("Health check endpoint hit");

    Json(HealthResponse {
        status: "healthy".to_string(),
        message: RUNNING_MESSAGE.to_string(),
    })
}

/// Readiness probe for K8s.
pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
