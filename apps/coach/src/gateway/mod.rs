//! The AI gateway as seen from the client.
//!
//! [`Gateway`] is the seam the controllers depend on; [`HttpGateway`] talks to
//! the real service and tests substitute a fake. Each call is a single request
//! with a single response: no retries, no caching, no batching.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::Feedback;

pub use http::HttpGateway;

pub const QUESTIONS_PATH: &str = "/api/interview/questions";
pub const FEEDBACK_PATH: &str = "/api/interview/feedback";
pub const ANALYZE_PATH: &str = "/api/resume/analyze";
pub const GENERATE_PATH: &str = "/api/resume/generate";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Connection failure, timeout, or an unreadable body.
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    /// The gateway answered with a non-2xx status.
    #[error("{path} returned status {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    /// The body did not have the expected shape.
    #[error("unexpected response from {path}: {reason}")]
    Malformed { path: String, reason: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionsRequest {
    pub position: String,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// `{ text }` or `{ content, name, position, experience }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeRequest {
    Plain {
        text: String,
    },
    WithProfile {
        content: String,
        name: String,
        position: String,
        experience: String,
    },
}

/// `{ keywords }` or `{ name, position, experience, keywords }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    Plain {
        keywords: String,
    },
    WithProfile {
        name: String,
        position: String,
        experience: String,
        keywords: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Response bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ResultBody {
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StructuredBody {
    pub feedback: crate::interview::StructuredFeedback,
}

/// Error envelope the gateway uses for 4xx/5xx bodies.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Operations the client needs from the AI gateway.
///
/// Carried by controllers as `Arc<dyn Gateway>` so tests can inject a fake.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Raw question list, one question per line.
    async fn generate_interview_questions(
        &self,
        request: &QuestionsRequest,
    ) -> Result<String, GatewayError>;

    /// Feedback on one answer, normalized to the configured shape.
    async fn get_interview_feedback(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Feedback, GatewayError>;

    async fn analyze_resume(&self, request: &AnalyzeRequest) -> Result<String, GatewayError>;

    async fn generate_resume(&self, request: &GenerateRequest) -> Result<String, GatewayError>;
}
