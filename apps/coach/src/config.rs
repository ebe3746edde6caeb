use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which feedback body the gateway deployment serves. Must match the
/// gateway's own `FEEDBACK_FORMAT`; responses are never sniffed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackFormat {
    #[default]
    Text,
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

/// Client configuration: where the gateway lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    pub gateway_url: String,
    pub timeout: Duration,
    pub feedback_format: FeedbackFormat,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            feedback_format: FeedbackFormat::default(),
        }
    }
}

impl CoachConfig {
    /// Reads `GATEWAY_URL`, `GATEWAY_TIMEOUT_SECS` and `FEEDBACK_FORMAT`,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            gateway_url: optional_env("GATEWAY_URL").unwrap_or(defaults.gateway_url),
            timeout: match optional_env("GATEWAY_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(
                    v.parse::<u64>()
                        .context("GATEWAY_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.timeout,
            },
            feedback_format: match optional_env("FEEDBACK_FORMAT") {
                Some(v) => v.parse::<FeedbackFormat>()?,
                None => defaults.feedback_format,
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
