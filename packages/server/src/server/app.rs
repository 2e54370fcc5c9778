//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use gemini_client::GeminiClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::jobs::{JobStore, MemoryJobStore};
use crate::kernel::{BaseAI, GeminiAI};
use crate::server::routes::{
    availability_handler, health_handler, input_schema_handler, start_job_handler, status_handler,
};
use crate::verification::VerificationAgent;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub agent: Arc<VerificationAgent>,
    pub agent_identifier: Option<String>,
}

/// Build the Axum application router from configuration.
///
/// Wires the Gemini client into the verification agent and hands every
/// handler the job store by reference through shared state.
pub fn build_app(config: &Config) -> Result<Router> {
    let mut client = GeminiClient::new(config.gemini_api_key.clone())?;
    if let Some(base_url) = &config.gemini_base_url {
        client = client.with_base_url(base_url);
    }

    let ai: Arc<dyn BaseAI> = Arc::new(GeminiAI::new(client, &config.gemini_model));
    let agent = Arc::new(VerificationAgent::new(ai, &config.gemini_model));
    let store: Arc<dyn JobStore> = Arc::new(MemoryJobStore::new());

    let state = AppState {
        store,
        agent,
        agent_identifier: config.agent_identifier.clone(),
    };

    Ok(build_router(state))
}

/// Build the router for a prepared app state. Split out so tests can inject
/// mock dependencies.
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/availability", get(availability_handler))
        .route("/health", get(health_handler))
        .route("/input_schema", get(input_schema_handler))
        .route("/start_job", post(start_job_handler))
        .route("/status", get(status_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
