use axum::{extract::Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::common::ApiError;
use crate::kernel::jobs::{Job, JobInput};
use crate::server::app::AppState;

/// Upper bound on accepted source text, in characters. Larger inputs are
/// rejected at intake rather than silently dropped in the prompt.
pub const MAX_INPUT_CHARS: usize = 200_000;

#[derive(Serialize)]
pub struct StartJobResponse {
    status: String,
    job_id: Uuid,
}

/// Start-job endpoint from the agent convention.
///
/// Validates the body against the declared input schema, creates a pending
/// job, and kicks off the verification pipeline in the background. Malformed
/// input never creates a job.
pub async fn start_job_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<StartJobResponse>, ApiError> {
    let input_data = body
        .get("input_data")
        .and_then(|v| v.as_object())
        .ok_or_else(|| ApiError::Validation("input_data object is required".to_string()))?;

    let text = input_data
        .get("text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ApiError::Validation("input_data.text must be a string".to_string()))?
        .trim();

    if text.is_empty() {
        return Err(ApiError::Validation(
            "input_data.text must not be empty".to_string(),
        ));
    }

    if text.chars().count() > MAX_INPUT_CHARS {
        return Err(ApiError::Validation(format!(
            "input_data.text exceeds {} characters",
            MAX_INPUT_CHARS
        )));
    }

    let identifier_from_purchaser = body
        .get("identifier_from_purchaser")
        .and_then(|v| v.as_str())
        .map(String::from);

    let job = Job::new(
        JobInput {
            text: text.to_string(),
        },
        identifier_from_purchaser,
    );
    let job_id = job.id;

    state
        .store
        .insert(job)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(job_id = %job_id, "New verification job created");

    let store = state.store.clone();
    let agent = state.agent.clone();
    tokio::spawn(async move {
        agent.run_job(store, job_id).await;
    });

    Ok(Json(StartJobResponse {
        status: "success".to_string(),
        job_id,
    }))
}
