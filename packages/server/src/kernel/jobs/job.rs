//! Job model for background verification work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::verification::KnowledgeObject;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

// ============================================================================
// Job Model
// ============================================================================

/// Input accepted by the verification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInput {
    /// Source text to verify
    pub text: String,
}

/// One unit of ingestion-to-verification work, tracked by id and status.
///
/// Mutated only through [`super::JobStore`] transition methods, which keep the
/// status/result/error fields consistent: `result` is `Some` iff `Completed`,
/// `error_message` is `Some` only when `Failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub input: JobInput,

    /// Purchaser-supplied correlation id from the MIP-003 request body.
    pub identifier_from_purchaser: Option<String>,

    /// Present iff status is Completed.
    pub result: Option<KnowledgeObject>,

    /// Present only when status is Failed.
    pub error_message: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new pending job for the given input.
    pub fn new(input: JobInput, identifier_from_purchaser: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Pending,
            input,
            identifier_from_purchaser,
            result: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}
