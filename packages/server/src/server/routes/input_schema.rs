use axum::Json;
use serde_json::json;

/// Input schema endpoint from the agent convention.
///
/// Declares the fields `/start_job` validates: a single required `text`
/// string under `input_data`.
pub async fn input_schema_handler() -> Json<serde_json::Value> {
    Json(json!({
        "input_data": [
            {
                "id": "text",
                "type": "string",
                "name": "Text to verify",
                "data": {
                    "description": "Text to analyze for reliability, claims, and bias",
                    "placeholder": "Paste the text to verify..."
                }
            }
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_declares_text_field() {
        let Json(schema) = input_schema_handler().await;

        let fields = schema["input_data"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["id"], "text");
        assert_eq!(fields[0]["type"], "string");
    }
}
