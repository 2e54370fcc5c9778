//! LLM prompts for the verification pipeline.
//!
//! The prompt is deterministic for a given source text, and its template is
//! hashed so every knowledge object can be tied to the exact prompt revision
//! that produced it.

use gemini_client::truncate_to_char_boundary;
use sha2::{Digest, Sha256};

/// System prompt framing the verification role.
pub const VERIFY_SYSTEM_PROMPT: &str = "You are a careful fact-checking assistant. \
You analyze text for factual reliability and bias. You never invent facts and \
you respond only with the requested JSON object, no prose and no code fences.";

/// Prompt for verifying a piece of source text.
pub const VERIFY_PROMPT: &str = r#"Analyze the source text below and produce a verification report.

Your report must contain:
1. A clear, neutral, factual summary in 2-4 sentences, avoiding assumptions
2. The distinct factual claims the text makes, in the order they appear
3. A reliability score from 0 (certainly false or unverifiable) to 100 (well-established fact)
4. A bias level: "low", "medium", or "high", based on loaded language, absolutes, and one-sidedness
5. A one or two sentence explanation of the bias level

Output JSON:
{
    "summary": "neutral summary of the text",
    "key_claims": ["claim 1", "claim 2"],
    "reliability_score": 0,
    "bias_level": "low" | "medium" | "high",
    "bias_explanation": "why this bias level"
}

Source text:
{text}"#;

/// Byte budget for the source text embedded in the prompt.
pub const MAX_SOURCE_BYTES: usize = 8000;

/// Build the verification prompt for a piece of source text.
///
/// The text is truncated to [`MAX_SOURCE_BYTES`] at a character boundary so
/// oversized inputs cannot blow the model's context window.
pub fn build_verify_prompt(text: &str) -> String {
    let truncated = truncate_to_char_boundary(text, MAX_SOURCE_BYTES);
    VERIFY_PROMPT.replace("{text}", truncated)
}

/// SHA-256 hex digest of the prompt template, recorded in provenance.
pub fn prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(VERIFY_SYSTEM_PROMPT.as_bytes());
    hasher.update(VERIFY_PROMPT.as_bytes());
    hex::encode(hasher.finalize())
}
