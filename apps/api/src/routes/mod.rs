pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview practice
        .route("/api/interview/questions", post(interview::handle_questions))
        .route("/api/interview/feedback", post(interview::handle_feedback))
        // Resume
        .route("/api/resume/analyze", post(resume::handle_analyze))
        .route("/api/resume/generate", post(resume::handle_generate))
        .fallback(not_found)
        .with_state(state)
}
