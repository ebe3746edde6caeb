//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::{required, ApiJson, AppError};
use crate::llm_client::LanguageModel;
use crate::models::ResultResponse;
use crate::resume::prompts::{
    analyze_prompt, generate_prompt, Applicant, ANALYZE_SYSTEM, GENERATE_SYSTEM,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Accepts both `{ text }` and `{ content, name, position, experience }`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub content: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
}

/// Keywords may arrive as one comma-separated string or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Text(String),
    List(Vec<String>),
}

impl Keywords {
    pub fn normalized(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            Keywords::Text(text) => text.split(',').collect(),
            Keywords::List(list) => list.iter().map(String::as_str).collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Accepts both `{ keywords }` and `{ name, position, experience, keywords }`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub keywords: Option<Keywords>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
}

fn applicant<'a>(
    name: &'a Option<String>,
    position: &'a Option<String>,
    experience: &'a Option<String>,
) -> Applicant<'a> {
    Applicant {
        name: name.as_deref(),
        position: position.as_deref(),
        experience: experience.as_deref(),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let draft = required(
        non_blank(&request.text).or(non_blank(&request.content)),
        "text",
    )?;

    info!(draft_chars = draft.chars().count(), "Analyzing resume draft");

    let prompt = analyze_prompt(
        applicant(&request.name, &request.position, &request.experience),
        draft,
    );
    let result = state.llm.complete(&prompt, ANALYZE_SYSTEM).await?;

    Ok(Json(ResultResponse::new(result)))
}

/// POST /api/resume/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    let keywords = request
        .keywords
        .as_ref()
        .map(Keywords::normalized)
        .unwrap_or_default();
    if keywords.is_empty() {
        return Err(AppError::Validation("keywords is required".to_string()));
    }

    info!(keywords = keywords.len(), "Generating resume");

    let prompt = generate_prompt(
        applicant(&request.name, &request.position, &request.experience),
        &keywords,
    );
    let result = state.llm.complete(&prompt, GENERATE_SYSTEM).await?;

    Ok(Json(ResultResponse::new(result)))
}
