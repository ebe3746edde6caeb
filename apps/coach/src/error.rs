use thiserror::Error;

use crate::gateway::GatewayError;
use crate::interview::QuestionId;

/// Input problems caught locally. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("answer is empty")]
    AnswerMissing,

    #[error("answer has {len} characters, at least {min} required")]
    AnswerTooShort { len: usize, min: usize },

    #[error("feedback for question {0} is already being requested")]
    FeedbackInFlight(QuestionId),

    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("no question is selected")]
    NoSelection,

    #[error("text has {len} characters, expected {min}..={max}")]
    TextLength { len: usize, min: usize, max: usize },

    #[error("no company with id {0}")]
    UnknownCompany(String),

    #[error("nothing selected to export")]
    NothingSelected,
}

impl ValidationError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField(field) => format!("{}을(를) 입력해주세요.", field_label(field)),
            ValidationError::AnswerMissing => "답변을 입력해주세요.".to_string(),
            ValidationError::AnswerTooShort { min, .. } => {
                format!("답변은 최소 {min}자 이상 입력해주세요.")
            }
            ValidationError::FeedbackInFlight(_) => "피드백을 생성하는 중입니다.".to_string(),
            ValidationError::UnknownQuestion(_) | ValidationError::NoSelection => {
                "질문을 선택해주세요.".to_string()
            }
            ValidationError::TextLength { min, max, .. } => {
                format!("{min}자 이상 {max}자 이하로 입력해주세요.")
            }
            ValidationError::UnknownCompany(_) => "기업 정보를 찾을 수 없습니다.".to_string(),
            ValidationError::NothingSelected => "출력할 항목을 선택해주세요.".to_string(),
        }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "role" | "position" => "지원 직무",
        "experience" => "경력",
        "keywords" => "키워드",
        "name" => "이름",
        "company" => "기업명",
        "text" => "자기소개서",
        other => other,
    }
}

/// Errors surfaced to the user by the coach's actions. All are terminal for
/// the action that raised them; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("gateway request failed: {0}")]
    Transport(String),

    #[error("gateway returned a malformed response: {0}")]
    MalformedResponse(String),

    /// The question list was regenerated while the request was in flight;
    /// the response was dropped.
    #[error("response arrived for a question that no longer exists")]
    Superseded,
}

impl CoachError {
    pub fn user_message(&self) -> String {
        match self {
            CoachError::Validation(e) => e.user_message(),
            CoachError::Transport(_) | CoachError::MalformedResponse(_) => {
                "요청 중 문제가 발생했습니다. 다시 시도해주세요.".to_string()
            }
            CoachError::Superseded => "질문 목록이 변경되어 결과를 반영하지 않았습니다.".to_string(),
        }
    }
}

impl From<GatewayError> for CoachError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Malformed { .. } => CoachError::MalformedResponse(err.to_string()),
            GatewayError::Transport { .. } | GatewayError::Status { .. } => {
                CoachError::Transport(err.to_string())
            }
        }
    }
}

/// Converts a gateway failure, logging malformed bodies separately from
/// transport failures so the two can be told apart in diagnostics.
pub(crate) fn report(err: GatewayError, action: &str) -> CoachError {
    match &err {
        GatewayError::Malformed { .. } => tracing::error!(action, "Malformed gateway response: {err}"),
        _ => tracing::warn!(action, "Gateway request failed: {err}"),
    }
    err.into()
}
