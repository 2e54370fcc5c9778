//! The knowledge object: the structured output record produced per job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bias classification of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLevel {
    Low,
    Medium,
    High,
}

impl BiasLevel {
    /// Parse a model-emitted label, tolerating case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(BiasLevel::Low),
            "medium" => Some(BiasLevel::Medium),
            "high" => Some(BiasLevel::High),
            _ => None,
        }
    }
}

/// Where a knowledge object came from: which model, which prompt revision, when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    pub model: String,
    pub prompt_hash: String,
    pub generated_at: DateTime<Utc>,
}

/// The structured verification result for one piece of source text.
///
/// Immutable once produced; created by the verification pipeline, read by API
/// consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeObject {
    /// SHA-256 hex digest of the submitted source text.
    pub source_text_ref: String,

    pub summary: String,

    /// Claims in the order the model extracted them.
    pub key_claims: Vec<String>,

    /// Always in [0, 100].
    pub reliability_score: u8,

    pub bias_level: BiasLevel,
    pub bias_explanation: String,

    pub provenance: Provenance,
}

/// Compute the SHA-256 hex digest used as a source text reference.
pub fn source_text_ref(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
