use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_identifier: Option<String>,
    message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Availability endpoint from the agent convention.
///
/// The service holds no external connections at rest, so reachable means
/// available.
pub async fn availability_handler(
    Extension(state): Extension<AppState>,
) -> Json<AvailabilityResponse> {
    Json(AvailabilityResponse {
        status: "available".to_string(),
        agent_identifier: state.agent_identifier.clone(),
        message: "Knowledge verification agent is ready".to_string(),
    })
}

/// Liveness alias kept alongside the agent convention surface.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
