//! Axum route handlers for the Interview API.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::FeedbackFormat;
use crate::errors::{required, ApiJson, AppError};
use crate::interview::feedback::{InterviewFeedback, RawFeedback};
use crate::interview::prompts::{
    feedback_json_prompt, feedback_text_prompt, questions_prompt, FEEDBACK_JSON_SYSTEM,
    FEEDBACK_TEXT_SYSTEM, QUESTIONS_SYSTEM,
};
use crate::llm_client::{complete_json, LanguageModel};
use crate::models::ResultResponse;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub position: Option<String>,
    pub experience: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StructuredFeedbackResponse {
    pub feedback: InterviewFeedback,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/questions
///
/// Returns the model's raw question list; the client splits it into lines.
pub async fn handle_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuestionsRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let position = required(request.position.as_deref(), "position")?;
    let experience = required(request.experience.as_deref(), "experience")?;
    let company = request
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    info!(
        position,
        experience,
        company = company.unwrap_or("-"),
        "Generating interview questions"
    );

    let prompt = questions_prompt(position, experience, company);
    let result = state.llm.complete(&prompt, QUESTIONS_SYSTEM).await?;

    Ok(Json(ResultResponse::new(result)))
}

/// POST /api/interview/feedback
///
/// Shape of the body depends on the deployment's `FEEDBACK_FORMAT`:
/// `{ result }` for text, `{ feedback: {...} }` for structured.
pub async fn handle_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> Result<Response, AppError> {
    let question = required(request.question.as_deref(), "question")?;
    let answer = required(request.answer.as_deref(), "answer")?;

    info!(
        format = ?state.config.feedback_format,
        answer_chars = answer.chars().count(),
        "Requesting interview feedback"
    );

    match state.config.feedback_format {
        FeedbackFormat::Text => {
            let prompt = feedback_text_prompt(question, answer);
            let result = state.llm.complete(&prompt, FEEDBACK_TEXT_SYSTEM).await?;
            Ok(Json(ResultResponse::new(result)).into_response())
        }
        FeedbackFormat::Structured => {
            let prompt = feedback_json_prompt(question, answer);
            let raw: RawFeedback =
                complete_json(state.llm.as_ref(), &prompt, FEEDBACK_JSON_SYSTEM).await?;
            Ok(Json(StructuredFeedbackResponse {
                feedback: raw.into(),
            })
            .into_response())
        }
    }
}
