//! Verification domain: prompt construction, the pipeline, and result
//! normalization into knowledge objects.

pub mod agent;
pub mod knowledge;
pub mod parse;
pub mod prompts;

pub use agent::{VerificationAgent, VerifyError};
pub use knowledge::{source_text_ref, BiasLevel, KnowledgeObject, Provenance};
pub use parse::{normalize, Normalized};
