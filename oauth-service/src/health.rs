//! Health check handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Liveness probe. Always `200 OK` while the server is handling traffic.
pub async fn health(State(service): State<String>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service,
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
}
