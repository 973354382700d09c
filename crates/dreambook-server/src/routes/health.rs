// Health check endpoint
//
// Used by the host supervisor's readiness polling and by the client
// SDK's availability probe.

use axum::response::Json;
use chrono::Utc;
use serde::Serialize;

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now().timestamp_millis(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
