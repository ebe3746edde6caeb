// All LLM prompt constants for the Resume module.

use crate::llm_client::prompts::{profile_lines, RESPOND_IN_KOREAN};

/// System prompt for draft critique.
pub const ANALYZE_SYSTEM: &str = "You are an expert cover letter editor. \
    Review the draft for grammar, structure and expressiveness, and list concrete \
    improvements with a suggested rewrite for each.";

/// System prompt for generation from keywords.
pub const GENERATE_SYSTEM: &str = "You are an expert cover letter writer. \
    Write a complete, natural cover letter built around the keywords provided. \
    Do NOT invent employers, dates or metrics that the user did not give.";

/// Optional applicant details shared by both resume endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct Applicant<'a> {
    pub name: Option<&'a str>,
    pub position: Option<&'a str>,
    pub experience: Option<&'a str>,
}

impl Applicant<'_> {
    fn lines(&self) -> String {
        profile_lines(&[
            ("이름", self.name),
            ("희망 직무", self.position),
            ("경력", self.experience),
        ])
    }
}

pub fn analyze_prompt(applicant: Applicant<'_>, draft: &str) -> String {
    format!(
        "{}\n다음 자기소개서를 첨삭하세요.\n\n{draft}\n\n{RESPOND_IN_KOREAN}",
        applicant.lines()
    )
}

pub fn generate_prompt(applicant: Applicant<'_>, keywords: &[String]) -> String {
    format!(
        "{}\n다음 키워드를 활용해 자기소개서를 작성하세요: {}\n\n{RESPOND_IN_KOREAN}",
        applicant.lines(),
        keywords.join(", ")
    )
}
