//! Plain-text bundle of the sections a user picks for printing or saving.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::companies::CompanyBook;
use crate::dashboard::DashboardSummary;
use crate::error::ValidationError;
use crate::interview::QuestionStore;
use crate::profile::PersonalInfo;
use crate::resume::ResumeWorkspace;

/// Sections of the bundle. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportItem {
    PersonalInfo,
    Resume,
    Companies,
    Questions,
    Answers,
    Summary,
}

impl ExportItem {
    pub const ALL: [ExportItem; 6] = [
        ExportItem::PersonalInfo,
        ExportItem::Resume,
        ExportItem::Companies,
        ExportItem::Questions,
        ExportItem::Answers,
        ExportItem::Summary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ExportItem::PersonalInfo => "개인정보",
            ExportItem::Resume => "자기소개서",
            ExportItem::Companies => "지원 기업",
            ExportItem::Questions => "면접 질문",
            ExportItem::Answers => "면접 답변",
            ExportItem::Summary => "진행 요약",
        }
    }
}

pub struct ExportSources<'a> {
    pub profile: &'a PersonalInfo,
    pub resume: &'a ResumeWorkspace,
    pub companies: &'a CompanyBook,
    pub questions: &'a QuestionStore,
}

/// Renders the selected sections as `[title]` blocks separated by a blank line.
/// Sections with nothing to show are left out; if that leaves nothing, the
/// selection is rejected.
pub fn compose(items: &[ExportItem], sources: &ExportSources<'_>) -> Result<String, ValidationError> {
    let selected: BTreeSet<ExportItem> = items.iter().copied().collect();
    if selected.is_empty() {
        return Err(ValidationError::NothingSelected);
    }

    let sections: Vec<String> = selected
        .into_iter()
        .filter_map(|item| {
            let body = render(item, sources);
            let body = body.trim_end();
            (!body.is_empty()).then(|| format!("[{}]\n{}", item.title(), body))
        })
        .collect();

    if sections.is_empty() {
        return Err(ValidationError::NothingSelected);
    }
    Ok(sections.join("\n\n"))
}

fn render(item: ExportItem, sources: &ExportSources<'_>) -> String {
    match item {
        ExportItem::PersonalInfo => sources.profile.summary(),
        ExportItem::Resume => {
            let mut out = String::new();
            let draft = sources.resume.draft().trim();
            if !draft.is_empty() {
                out.push_str(draft);
                out.push('\n');
            }
            if let Some(analysis) = sources.resume.analysis() {
                out.push_str(&format!("\n첨삭 결과:\n{}\n", analysis.trim()));
            }
            if let Some(generated) = sources.resume.generated() {
                out.push_str(&format!("\nAI 생성본:\n{}\n", generated.trim()));
            }
            out.trim_start().to_string()
        }
        ExportItem::Companies => sources
            .companies
            .list()
            .iter()
            .map(|c| {
                if c.keywords.is_empty() {
                    format!("- {} / {}\n", c.name, c.position)
                } else {
                    format!("- {} / {} ({})\n", c.name, c.position, c.keywords.join(", "))
                }
            })
            .collect(),
        ExportItem::Questions => sources
            .questions
            .questions()
            .iter()
            .map(|q| format!("{}. {}\n", q.id(), q.text()))
            .collect(),
        ExportItem::Answers => sources
            .questions
            .questions()
            .iter()
            .filter(|q| !q.answer_text().trim().is_empty())
            .map(|q| {
                format!(
                    "Q{}. {}\nA. {} [{}]\n",
                    q.id(),
                    q.text(),
                    q.answer_text().trim(),
                    q.status().label()
                )
            })
            .collect(),
        ExportItem::Summary => DashboardSummary::collect(
            sources.profile,
            sources.companies,
            sources.resume,
            sources.questions,
        )
        .render(),
    }
}
