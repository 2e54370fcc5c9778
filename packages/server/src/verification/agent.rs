//! The verification pipeline: prompt, provider call, normalization, job
//! transitions.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::kernel::jobs::JobStore;
use crate::kernel::BaseAI;

use super::knowledge::{source_text_ref, KnowledgeObject};
use super::parse::{normalize, Normalized};
use super::prompts::{build_verify_prompt, prompt_hash, VERIFY_SYSTEM_PROMPT};

/// Pipeline errors, both recorded on the job as its failure message.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The provider call failed; the message is the provider error verbatim.
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered but the output did not normalize.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Runs one verification per job: build prompt, call the model once, normalize.
pub struct VerificationAgent {
    ai: Arc<dyn BaseAI>,
    model: String,
}

impl VerificationAgent {
    pub fn new(ai: Arc<dyn BaseAI>, model: impl Into<String>) -> Self {
        Self {
            ai,
            model: model.into(),
        }
    }

    /// Verify a piece of source text.
    ///
    /// One provider call, no retries. Fails safe on unparseable output.
    pub async fn verify_text(&self, text: &str) -> Result<KnowledgeObject, VerifyError> {
        let prompt = format!("{}\n\n{}", VERIFY_SYSTEM_PROMPT, build_verify_prompt(text));

        // Alternate formatting prints the whole error chain, so the
        // provider's own message survives any context wrapping above it.
        let response = self
            .ai
            .complete(&prompt)
            .await
            .map_err(|e| VerifyError::Provider(format!("{:#}", e)))?;

        match normalize(&response, source_text_ref(text), &self.model, &prompt_hash()) {
            Normalized::Parsed(ko) => Ok(ko),
            Normalized::ParseFailure { reason } => Err(VerifyError::Parse(reason)),
        }
    }

    /// Run the pipeline for a stored job, transitioning it through
    /// running and into completed or failed.
    pub async fn run_job(&self, store: Arc<dyn JobStore>, job_id: Uuid) {
        tracing::info!(job_id = %job_id, "Running verification job");

        let job = match store.get(job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::error!(job_id = %job_id, "Job disappeared before execution");
                return;
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Failed to load job");
                return;
            }
        };

        if let Err(e) = store.mark_running(job_id).await {
            tracing::error!(job_id = %job_id, error = %e, "Failed to mark job running");
            return;
        }

        match self.verify_text(&job.input.text).await {
            Ok(ko) => {
                let score = ko.reliability_score;
                if let Err(e) = store.complete(job_id, ko).await {
                    tracing::error!(job_id = %job_id, error = %e, "Failed to record job result");
                    return;
                }
                tracing::info!(job_id = %job_id, reliability_score = score, "Job completed");
            }
            Err(e) => {
                let message = e.to_string();
                if let Err(e) = store.fail(job_id, message.clone()).await {
                    tracing::error!(job_id = %job_id, error = %e, "Failed to record job failure");
                    return;
                }
                tracing::error!(job_id = %job_id, error = %message, "Job failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::jobs::{Job, JobInput, JobStatus, MemoryJobStore};
    use crate::kernel::{GeminiAI, MockAI};
    use crate::verification::BiasLevel;
    use gemini_client::GeminiClient;

    const LOW_RELIABILITY_RESPONSE: &str = r#"{
        "summary": "The text asserts that the sky is green and that water boils at 50 degrees Celsius, both contrary to established fact.",
        "key_claims": ["The sky is green", "Water boils at 50 degrees Celsius"],
        "reliability_score": 3,
        "bias_level": "low",
        "bias_explanation": "Flat declarative statements without persuasive framing."
    }"#;

    fn agent_with(mock: MockAI) -> VerificationAgent {
        VerificationAgent::new(Arc::new(mock), "gemini-2.5-flash")
    }

    async fn insert_job(store: &MemoryJobStore, text: &str) -> Uuid {
        let job = Job::new(JobInput { text: text.into() }, None);
        let id = job.id;
        store.insert(job).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_false_claims_get_low_score_with_claims() {
        let agent = agent_with(MockAI::new().with_response(LOW_RELIABILITY_RESPONSE));

        let ko = agent
            .verify_text("The sky is green and water boils at 50°C")
            .await
            .unwrap();

        assert!(ko.reliability_score < 50);
        assert!(!ko.key_claims.is_empty());
        assert_eq!(ko.bias_level, BiasLevel::Low);
        assert_eq!(ko.source_text_ref.len(), 64);
    }

    #[tokio::test]
    async fn test_prompt_contains_source_text() {
        let mock = MockAI::new().with_response(LOW_RELIABILITY_RESPONSE);
        let observer = mock.clone();
        let agent = agent_with(mock);

        agent.verify_text("water boils at 50°C").await.unwrap();

        let prompts = observer.calls();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("water boils at 50°C"));
    }

    #[tokio::test]
    async fn test_provider_error_captured_verbatim() {
        let agent = agent_with(MockAI::new().with_error("429 rate limited"));

        let err = agent.verify_text("anything").await.unwrap_err();
        assert!(matches!(err, VerifyError::Provider(_)));
        assert!(err.to_string().contains("429 rate limited"));
    }

    #[tokio::test]
    async fn test_provider_error_keeps_underlying_cause() {
        // No listener on this port, so the request fails at connect time.
        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let agent = VerificationAgent::new(
            Arc::new(GeminiAI::new(client, "gemini-2.5-flash")),
            "gemini-2.5-flash",
        );

        let err = agent.verify_text("anything").await.unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, VerifyError::Provider(_)));
        // The client's own error must survive the context wrapper, not just
        // the outermost message.
        assert!(message.contains("Network error"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_unparseable_output_fails_safe() {
        let agent = agent_with(MockAI::new().with_response("Sure! The text looks dubious."));

        let err = agent.verify_text("anything").await.unwrap_err();
        assert!(matches!(err, VerifyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_run_job_completes() {
        let store = Arc::new(MemoryJobStore::new());
        let agent = agent_with(MockAI::new().with_response(LOW_RELIABILITY_RESPONSE));
        let id = insert_job(&store, "The sky is green").await;

        agent.run_job(store.clone(), id).await;

        let job = store.get(id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.result.is_some());
    }

    #[tokio::test]
    async fn test_run_job_records_provider_failure() {
        let store = Arc::new(MemoryJobStore::new());
        let agent = agent_with(MockAI::new().with_error("connection reset by peer"));
        let id = insert_job(&store, "anything").await;

        agent.run_job(store.clone(), id).await;

        let job = store.get(id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.result.is_none());
        assert!(job
            .error_message
            .unwrap()
            .contains("connection reset by peer"));
    }

    #[tokio::test]
    async fn test_run_job_records_parse_failure() {
        let store = Arc::new(MemoryJobStore::new());
        let agent = agent_with(MockAI::new().with_response("not json at all"));
        let id = insert_job(&store, "anything").await;

        agent.run_job(store.clone(), id).await;

        let job = store.get(id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error_message.unwrap().contains("parse error"));
    }
}
