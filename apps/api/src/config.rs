use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Response shape served by `POST /api/interview/feedback`.
///
/// One deployment serves exactly one shape; the client is configured with the
/// same flag so it never has to guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackFormat {
    /// `{ "result": "<free text>" }`
    #[default]
    Text,
    /// `{ "feedback": { "score", "improvements", "suggestions" } }`
    Structured,
}

impl FromStr for FeedbackFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FeedbackFormat::Text),
            "structured" | "json" => Ok(FeedbackFormat::Structured),
            other => Err(anyhow!(
                "FEEDBACK_FORMAT must be 'text' or 'structured', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub feedback_format: FeedbackFormat,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_base: optional_env("LLM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            feedback_format: optional_env("FEEDBACK_FORMAT")
                .map(|v| v.parse::<FeedbackFormat>())
                .transpose()?
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests(feedback_format: FeedbackFormat) -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            llm_api_base: DEFAULT_API_BASE.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            llm_timeout_secs: 30,
            feedback_format,
            port: 3001,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
