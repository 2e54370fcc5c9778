//! Result normalization: model text in, knowledge object out.
//!
//! Parsing is all-or-nothing. A missing field, an out-of-range score, or an
//! unknown bias label is a `ParseFailure` with the reason; field values are
//! never guessed or clamped.

use chrono::Utc;
use gemini_client::strip_code_blocks;
use serde::Deserialize;

use super::knowledge::{BiasLevel, KnowledgeObject, Provenance};

/// Outcome of normalizing a model response.
#[derive(Debug)]
pub enum Normalized {
    Parsed(KnowledgeObject),
    ParseFailure { reason: String },
}

/// The JSON shape the prompt asks the model to emit.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    summary: String,
    key_claims: Vec<String>,
    reliability_score: i64,
    bias_level: String,
    bias_explanation: String,
}

/// Parse a model response into a knowledge object.
///
/// Accepts raw JSON or JSON wrapped in markdown code fences, since models emit
/// both even when asked not to.
pub fn normalize(
    response: &str,
    source_text_ref: String,
    model: &str,
    prompt_hash: &str,
) -> Normalized {
    let cleaned = strip_code_blocks(response);

    let raw: RawVerdict = match serde_json::from_str(cleaned) {
        Ok(raw) => raw,
        Err(e) => {
            return Normalized::ParseFailure {
                reason: format!("model output is not the expected JSON shape: {}", e),
            }
        }
    };

    if raw.summary.trim().is_empty() {
        return Normalized::ParseFailure {
            reason: "model output has an empty summary".to_string(),
        };
    }

    let reliability_score = match u8::try_from(raw.reliability_score) {
        Ok(score) if score <= 100 => score,
        _ => {
            return Normalized::ParseFailure {
                reason: format!(
                    "reliability_score {} outside [0, 100]",
                    raw.reliability_score
                ),
            }
        }
    };

    let bias_level = match BiasLevel::parse(&raw.bias_level) {
        Some(level) => level,
        None => {
            return Normalized::ParseFailure {
                reason: format!("unknown bias_level {:?}", raw.bias_level),
            }
        }
    };

    Normalized::Parsed(KnowledgeObject {
        source_text_ref,
        summary: raw.summary,
        key_claims: raw.key_claims,
        reliability_score,
        bias_level,
        bias_explanation: raw.bias_explanation,
        provenance: Provenance {
            model: model.to_string(),
            prompt_hash: prompt_hash.to_string(),
            generated_at: Utc::now(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_RESPONSE: &str = r#"{
        "summary": "The text claims the sky is green and that water boils at 50 degrees Celsius.",
        "key_claims": ["The sky is green", "Water boils at 50 degrees Celsius"],
        "reliability_score": 5,
        "bias_level": "low",
        "bias_explanation": "Plain declarative statements without loaded language."
    }"#;

    fn parse(response: &str) -> Normalized {
        normalize(
            response,
            "sourcehash".into(),
            "gemini-2.5-flash",
            "prompthash",
        )
    }

    #[test]
    fn test_parses_valid_response() {
        let Normalized::Parsed(ko) = parse(GOOD_RESPONSE) else {
            panic!("expected Parsed");
        };

        assert_eq!(ko.reliability_score, 5);
        assert_eq!(ko.bias_level, BiasLevel::Low);
        assert_eq!(ko.key_claims.len(), 2);
        assert_eq!(ko.key_claims[0], "The sky is green");
        assert_eq!(ko.source_text_ref, "sourcehash");
        assert_eq!(ko.provenance.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_parses_fenced_response() {
        let fenced = format!("```json\n{}\n```", GOOD_RESPONSE);
        assert!(matches!(parse(&fenced), Normalized::Parsed(_)));
    }

    #[test]
    fn test_rejects_non_json() {
        let Normalized::ParseFailure { reason } = parse("I think the text is unreliable.") else {
            panic!("expected ParseFailure");
        };
        assert!(reason.contains("JSON"));
    }

    #[test]
    fn test_rejects_missing_field() {
        let missing = r#"{"summary": "s", "key_claims": [], "reliability_score": 50}"#;
        assert!(matches!(parse(missing), Normalized::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let high = GOOD_RESPONSE.replace("\"reliability_score\": 5", "\"reliability_score\": 150");
        let Normalized::ParseFailure { reason } = parse(&high) else {
            panic!("expected ParseFailure");
        };
        assert!(reason.contains("150"));

        let negative =
            GOOD_RESPONSE.replace("\"reliability_score\": 5", "\"reliability_score\": -1");
        assert!(matches!(parse(&negative), Normalized::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_unknown_bias_level() {
        let bad = GOOD_RESPONSE.replace("\"bias_level\": \"low\"", "\"bias_level\": \"extreme\"");
        let Normalized::ParseFailure { reason } = parse(&bad) else {
            panic!("expected ParseFailure");
        };
        assert!(reason.contains("extreme"));
    }

    #[test]
    fn test_rejects_empty_summary() {
        let empty = GOOD_RESPONSE.replace(
            "The text claims the sky is green and that water boils at 50 degrees Celsius.",
            "  ",
        );
        assert!(matches!(parse(&empty), Normalized::ParseFailure { .. }));
    }

    #[test]
    fn test_boundary_scores_accepted() {
        for score in ["0", "100"] {
            let response =
                GOOD_RESPONSE.replace("\"reliability_score\": 5", &format!("\"reliability_score\": {}", score));
            assert!(
                matches!(parse(&response), Normalized::Parsed(_)),
                "score {} should parse",
                score
            );
        }
    }
}
