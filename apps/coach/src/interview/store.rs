use serde::Serialize;

use super::question::{Feedback, Question, QuestionId, Status};

/// Answered/total counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterviewProgress {
    /// Questions with current feedback.
    pub answered: usize,
    pub total: usize,
    /// `answered / total` as a rounded percentage; 0 for an empty list.
    pub percent: u8,
}

/// Ordered, in-memory list of interview questions plus the current selection.
///
/// Operations on ids that are not in the list are no-ops and return `false`,
/// so a response that lands after the list was replaced cannot write into it.
#[derive(Debug, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
    selected: Option<QuestionId>,
    generation: u64,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current list, installs `questions` and clears the selection.
    pub fn replace_all(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.selected = None;
        self.generation += 1;
    }

    /// Number of times the list has been replaced. Ids are reused across
    /// generations, so in-flight work compares this instead.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select(&mut self, id: QuestionId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Stores a new answer and recomputes the status: empty → `Unanswered`,
    /// anything else → `Pending`.
    pub fn update_answer(&mut self, id: QuestionId, text: &str) -> bool {
        self.with_question(id, |q| q.set_answer(text))
    }

    pub fn set_status(&mut self, id: QuestionId, status: Status) -> bool {
        self.with_question(id, |q| q.set_status(status))
    }

    /// Attaches feedback and marks the question `Completed`.
    pub fn set_feedback(&mut self, id: QuestionId, feedback: Feedback) -> bool {
        self.with_question(id, |q| q.complete(feedback))
    }

    /// A feedback request failed: back to `Unanswered` with no feedback kept.
    pub fn mark_feedback_failed(&mut self, id: QuestionId) -> bool {
        self.with_question(id, Question::fail)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn selected_id(&self) -> Option<QuestionId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Question> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn progress(&self) -> InterviewProgress {
        let total = self.questions.len();
        let answered = self
            .questions
            .iter()
            .filter(|q| q.status() == Status::Completed)
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((answered * 100 + total / 2) / total) as u8
        };
        InterviewProgress {
            answered,
            total,
            percent,
        }
    }

    fn with_question(&mut self, id: QuestionId, f: impl FnOnce(&mut Question)) -> bool {
        match self.questions.iter_mut().find(|q| q.id() == id) {
            Some(question) => {
                f(question);
                true
            }
            None => false,
        }
    }
}
