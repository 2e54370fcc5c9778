use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    // Masumi payment integration settings. Held for the MIP-003 surface but
    // not exercised by the verification pipeline itself.
    pub agent_identifier: Option<String>,
    pub payment_service_url: Option<String>,
    pub payment_api_key: Option<String>,
    pub network: Option<String>,
    pub seller_vkey: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
            agent_identifier: env::var("AGENT_IDENTIFIER").ok(),
            payment_service_url: env::var("PAYMENT_SERVICE_URL").ok(),
            payment_api_key: env::var("PAYMENT_API_KEY").ok(),
            network: env::var("NETWORK").ok(),
            seller_vkey: env::var("SELLER_VKEY").ok(),
        })
    }
}
