use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ApiError;
use crate::kernel::jobs::JobStatus;
use crate::server::app::AppState;
use crate::verification::KnowledgeObject;

#[derive(Deserialize)]
pub struct StatusParams {
    job_id: Option<String>,
}

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_from_purchaser: Option<String>,
    /// Present iff status is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<KnowledgeObject>,
    /// Present when status is failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status endpoint from the agent convention.
///
/// Unknown and malformed job ids both read as "no such job" to the caller.
pub async fn status_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let raw_id = params
        .job_id
        .ok_or_else(|| ApiError::Validation("job_id query parameter is required".to_string()))?;

    let job_id =
        Uuid::parse_str(&raw_id).map_err(|_| ApiError::JobNotFound(raw_id.clone()))?;

    let job = state
        .store
        .get(job_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::JobNotFound(raw_id))?;

    Ok(Json(JobStatusResponse {
        job_id: job.id,
        status: job.status,
        identifier_from_purchaser: job.identifier_from_purchaser,
        result: job.result,
        error: job.error_message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::jobs::{Job, JobInput, JobStore, MemoryJobStore};
    use crate::kernel::MockAI;
    use crate::verification::{source_text_ref, BiasLevel, KnowledgeObject, Provenance, VerificationAgent};
    use chrono::Utc;
    use std::sync::Arc;

    fn test_state() -> (AppState, Arc<MemoryJobStore>) {
        let store = Arc::new(MemoryJobStore::new());
        let agent = Arc::new(VerificationAgent::new(
            Arc::new(MockAI::new()),
            "gemini-2.5-flash",
        ));
        let state = AppState {
            store: store.clone(),
            agent,
            agent_identifier: None,
        };
        (state, store)
    }

    fn params(job_id: Option<&str>) -> Query<StatusParams> {
        Query(StatusParams {
            job_id: job_id.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (state, _store) = test_state();

        let result = status_handler(
            Extension(state),
            params(Some("00000000-0000-0000-0000-000000000000")),
        )
        .await;

        assert!(matches!(result, Err(ApiError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let (state, _store) = test_state();

        let result = status_handler(Extension(state), params(Some("not-a-uuid"))).await;

        assert!(matches!(result, Err(ApiError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_id_is_validation_error() {
        let (state, _store) = test_state();

        let result = status_handler(Extension(state), params(None)).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_pending_job_has_no_result() {
        let (state, store) = test_state();
        let job = Job::new(
            JobInput {
                text: "hello".into(),
            },
            None,
        );
        let id = job.id;
        store.insert(job).await.unwrap();

        let Json(response) = status_handler(Extension(state), params(Some(&id.to_string())))
            .await
            .unwrap();

        assert_eq!(response.status, JobStatus::Pending);
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_completed_job_returns_knowledge_object() {
        let (state, store) = test_state();
        let job = Job::new(
            JobInput {
                text: "The sky is green".into(),
            },
            Some("buyer-1".into()),
        );
        let id = job.id;
        store.insert(job).await.unwrap();

        let ko = KnowledgeObject {
            source_text_ref: source_text_ref("The sky is green"),
            summary: "A false claim about the sky".into(),
            key_claims: vec!["The sky is green".into()],
            reliability_score: 4,
            bias_level: BiasLevel::Low,
            bias_explanation: "No loaded language".into(),
            provenance: Provenance {
                model: "gemini-2.5-flash".into(),
                prompt_hash: "abc".into(),
                generated_at: Utc::now(),
            },
        };
        store.complete(id, ko).await.unwrap();

        let Json(response) = status_handler(Extension(state), params(Some(&id.to_string())))
            .await
            .unwrap();

        assert_eq!(response.status, JobStatus::Completed);
        assert_eq!(response.identifier_from_purchaser.as_deref(), Some("buyer-1"));
        let result = response.result.unwrap();
        assert!(result.reliability_score <= 100);
        assert_eq!(result.bias_level, BiasLevel::Low);
    }

    #[tokio::test]
    async fn test_failed_job_returns_error_message() {
        let (state, store) = test_state();
        let job = Job::new(
            JobInput {
                text: "hello".into(),
            },
            None,
        );
        let id = job.id;
        store.insert(job).await.unwrap();
        store.fail(id, "provider error: 503".into()).await.unwrap();

        let Json(response) = status_handler(Extension(state), params(Some(&id.to_string())))
            .await
            .unwrap();

        assert_eq!(response.status, JobStatus::Failed);
        assert!(response.result.is_none());
        assert_eq!(response.error.as_deref(), Some("provider error: 503"));
    }
}
