use serde::Serialize;

use crate::companies::CompanyBook;
use crate::interview::{InterviewProgress, QuestionStore};
use crate::profile::PersonalInfo;
use crate::resume::ResumeWorkspace;

/// Progress overview across every section of the coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub personal_info_percent: u8,
    pub resume_percent: u8,
    pub company_count: usize,
    pub interview: InterviewProgress,
}

impl DashboardSummary {
    pub fn collect(
        profile: &PersonalInfo,
        companies: &CompanyBook,
        resume: &ResumeWorkspace,
        questions: &QuestionStore,
    ) -> Self {
        Self {
            personal_info_percent: profile.completion_percent(),
            resume_percent: resume.progress_percent(),
            company_count: companies.len(),
            interview: questions.progress(),
        }
    }

    /// Plain-text rendering used by the export bundle.
    pub(crate) fn render(&self) -> String {
        format!(
            "개인정보 완성도: {}%\n자기소개서 진행률: {}%\n지원 기업: {}곳\n면접 준비: {}/{} ({}%)",
            self.personal_info_percent,
            self.resume_percent,
            self.company_count,
            self.interview.answered,
            self.interview.total,
            self.interview.percent,
        )
    }
}
