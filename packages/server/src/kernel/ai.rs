// AI implementation using Gemini
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in the verification domain.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::{ChatRequest, GeminiClient, Message};

use super::BaseAI;

/// Gemini implementation of AI capabilities
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
    model: String,
}

impl GeminiAI {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for GeminiAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            prompt_length = prompt.len(),
            model = %self.model,
            "Building Gemini request for completion"
        );

        let request = ChatRequest::new(&self.model)
            .message(Message::user(prompt))
            .temperature(0.0);

        tracing::info!(model = %self.model, "Calling Gemini API");

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    prompt_preview = %gemini_client::truncate_to_char_boundary(prompt, 200),
                    "Gemini API call failed"
                );
                e
            })
            .context("Failed to call Gemini API")?;

        tracing::info!(
            response_length = response.content.len(),
            model = %self.model,
            "Gemini API response received"
        );

        Ok(response.content)
    }
}
