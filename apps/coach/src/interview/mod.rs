//! Interview practice: generated questions, local answers, AI feedback.
//!
//! [`QuestionStore`] holds the questions and the selection; the
//! [`InterviewController`] applies user actions to it and talks to the gateway.
//!
//! Per-question status machine:
//!
//! ```text
//!   Unanswered --edit (non-empty)--> Pending --feedback ok--> Completed
//!        ^                            |  ^                       |
//!        +------- edit (empty) -------+  +------ edit -----------+
//!        +------- feedback failed ----+
//! ```

pub mod controller;
pub mod parse;
pub mod question;
pub mod store;

pub use controller::{InterviewController, SaveConfirmation};
pub use parse::parse_questions;
pub use question::{
    Feedback, Question, QuestionId, Status, StructuredFeedback, MAX_ANSWER_CHARS,
    MIN_FEEDBACK_CHARS,
};
pub use store::{InterviewProgress, QuestionStore};
