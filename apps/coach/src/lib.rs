//! Client-side state for the career-prep assistant.
//!
//! The heart of the crate is the interview practice loop in [`interview`]:
//! questions are generated through the AI gateway, answered locally, and sent
//! back for feedback. The remaining modules hold the in-memory form state the
//! assistant collects along the way (profile, target companies, resume draft)
//! and the views derived from it (dashboard, export bundle).
//!
//! Everything here is single-threaded: stores are shared as `Rc<RefCell<_>>`
//! and only the gateway calls suspend.

pub mod companies;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod gateway;
pub mod interview;
pub mod profile;
pub mod resume;

pub use config::{CoachConfig, FeedbackFormat};
pub use error::{CoachError, ValidationError};
pub use gateway::{Gateway, GatewayError, HttpGateway};
pub use interview::{Feedback, InterviewController, Question, QuestionId, QuestionStore, Status};
pub use companies::{Company, CompanyBook, CompanyForm};
pub use dashboard::DashboardSummary;
pub use export::{compose, ExportItem, ExportSources};
pub use profile::PersonalInfo;
pub use resume::ResumeWorkspace;
