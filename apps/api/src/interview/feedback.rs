//! Structured interview feedback as served in `FeedbackFormat::Structured` deployments.

use serde::{Deserialize, Serialize};

/// Feedback exactly as the model returned it. Scores sometimes arrive as floats
/// or out of range, so they are normalized before leaving the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeedback {
    pub score: f64,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Wire shape: `{ "score": 0..=100, "improvements": [...], "suggestions": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub score: u32,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<RawFeedback> for InterviewFeedback {
    fn from(raw: RawFeedback) -> Self {
        let score = if raw.score.is_finite() {
            raw.score.round().clamp(0.0, 100.0) as u32
        } else {
            0
        };
        Self {
            score,
            improvements: clean(raw.improvements),
            suggestions: clean(raw.suggestions),
        }
    }
}

fn clean(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
