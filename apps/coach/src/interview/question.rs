use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest answer kept, in characters. Extra input is cut off.
pub const MAX_ANSWER_CHARS: usize = 1000;
/// Shortest trimmed answer that can be saved or sent for feedback.
pub const MIN_FEEDBACK_CHARS: usize = 50;

/// Position of a question in the generated list, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one question. Cyclic: there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Unanswered,
    /// Answer written (or edited) but no current feedback, or a request is outstanding.
    Pending,
    Completed,
}

impl Status {
    /// Label shown next to the question in the list.
    pub fn label(self) -> &'static str {
        match self {
            Status::Unanswered => "미입력",
            Status::Pending => "피드백 대기",
            Status::Completed => "완료",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFeedback {
    pub score: u32,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Feedback as normalized by the gateway client. Which variant appears is
/// fixed by configuration, never by the content of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Feedback {
    Text(String),
    Structured(StructuredFeedback),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    answer_text: String,
    status: Status,
    feedback: Option<Feedback>,
    /// Bumped on every answer edit.
    #[serde(skip)]
    revision: u64,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            answer_text: String::new(),
            status: Status::Unanswered,
            feedback: None,
            revision: 0,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current feedback; only present while the question is `Completed`.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback
            .as_ref()
            .filter(|_| self.status == Status::Completed)
    }

    /// Feedback kept from before the answer was edited again.
    pub fn stale_feedback(&self) -> Option<&Feedback> {
        self.feedback
            .as_ref()
            .filter(|_| self.status != Status::Completed)
    }

    /// Length of the trimmed answer in characters.
    pub fn answer_len(&self) -> usize {
        self.answer_text.trim().chars().count()
    }

    pub fn meets_feedback_minimum(&self) -> bool {
        self.answer_len() >= MIN_FEEDBACK_CHARS
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn set_answer(&mut self, text: &str) {
        self.revision += 1;
        self.answer_text = text.chars().take(MAX_ANSWER_CHARS).collect();
        self.status = if self.answer_text.trim().is_empty() {
            Status::Unanswered
        } else {
            Status::Pending
        };
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn complete(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
        self.status = Status::Completed;
    }

    pub(crate) fn fail(&mut self) {
        self.feedback = None;
        self.status = Status::Unanswered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_is_unanswered() {
        let q = Question::new(QuestionId::new(1), "자기소개를 해주세요.");
        assert_eq!(q.status(), Status::Unanswered);
        assert_eq!(q.answer_text(), "");
        assert!(q.feedback().is_none());
        assert_eq!(q.id().to_string(), "1");
    }

    #[test]
    fn test_answer_is_truncated_to_limit() {
        let mut q = Question::new(QuestionId::new(1), "q");
        q.set_answer(&"가".repeat(MAX_ANSWER_CHARS + 20));
        assert_eq!(q.answer_text().chars().count(), MAX_ANSWER_CHARS);
    }

    #[test]
    fn test_minimum_counts_trimmed_characters_not_bytes() {
        let mut q = Question::new(QuestionId::new(1), "q");
        q.set_answer(&format!("   {}   ", "가".repeat(49)));
        assert_eq!(q.answer_len(), 49);
        assert!(!q.meets_feedback_minimum());

        q.set_answer(&"가".repeat(50));
        assert!(q.meets_feedback_minimum());
    }

    #[test]
    fn test_feedback_visibility_follows_status() {
        let mut q = Question::new(QuestionId::new(1), "q");
        q.set_answer(&"a".repeat(60));
        q.complete(Feedback::Text("좋은 답변입니다.".into()));
        assert!(q.feedback().is_some());
        assert!(q.stale_feedback().is_none());

        q.set_answer(&"a".repeat(61));
        assert!(q.feedback().is_none());
        assert_eq!(
            q.stale_feedback(),
            Some(&Feedback::Text("좋은 답변입니다.".into()))
        );
    }

    #[test]
    fn test_feedback_serializes_with_kind_tag() {
        let json = serde_json::to_value(Feedback::Text("ok".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "text", "value": "ok" }));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Unanswered.label(), "미입력");
        assert_eq!(Status::Pending.label(), "피드백 대기");
        assert_eq!(Status::Completed.label(), "완료");
    }
}
