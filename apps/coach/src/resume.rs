//! Cover letter draft plus the AI critique and generation results for it.

use std::sync::Arc;

use tracing::info;

use crate::error::{report, CoachError, ValidationError};
use crate::gateway::{AnalyzeRequest, Gateway, GenerateRequest};
use crate::profile::PersonalInfo;

pub const MIN_DRAFT_CHARS: usize = 200;
pub const MAX_DRAFT_CHARS: usize = 5000;

pub struct ResumeWorkspace {
    gateway: Arc<dyn Gateway>,
    draft: String,
    analysis: Option<String>,
    generated: Option<String>,
}

impl ResumeWorkspace {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            draft: String::new(),
            analysis: None,
            generated: None,
        }
    }

    /// Replaces the draft, cut to [`MAX_DRAFT_CHARS`]. A previous analysis
    /// belongs to the old text and is dropped.
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.chars().take(MAX_DRAFT_CHARS).collect();
        self.analysis = None;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    pub fn draft_len(&self) -> usize {
        self.draft.chars().count()
    }

    pub fn can_analyze(&self) -> bool {
        self.validate_draft().is_ok()
    }

    /// 0 with nothing usable, 50 once the draft is long enough to analyze,
    /// 100 once an analysis or a generated letter exists.
    pub fn progress_percent(&self) -> u8 {
        if self.analysis.is_some() || self.generated.is_some() {
            100
        } else if self.can_analyze() {
            50
        } else {
            0
        }
    }

    /// Sends the draft for critique. With a profile that has name, position and
    /// experience, the profile-aware request shape is used.
    pub async fn analyze(&mut self, profile: Option<&PersonalInfo>) -> Result<&str, CoachError> {
        self.validate_draft()?;

        let request = match profile.filter(|p| p.is_complete_for_requests()) {
            Some(p) => AnalyzeRequest::WithProfile {
                content: self.draft.clone(),
                name: p.name.trim().to_string(),
                position: p.desired_position.trim().to_string(),
                experience: p.experience_years.trim().to_string(),
            },
            None => AnalyzeRequest::Plain {
                text: self.draft.clone(),
            },
        };

        let result = self
            .gateway
            .analyze_resume(&request)
            .await
            .map_err(|e| report(e, "analyze resume"))?;

        info!(draft_chars = self.draft_len(), "Resume analysis received");
        Ok(self.analysis.insert(result).as_str())
    }

    /// Generates a new letter from comma-separated keywords.
    pub async fn generate(
        &mut self,
        keywords: &str,
        profile: Option<&PersonalInfo>,
    ) -> Result<&str, CoachError> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(ValidationError::MissingField("keywords").into());
        }

        let request = match profile.filter(|p| p.is_complete_for_requests()) {
            Some(p) => GenerateRequest::WithProfile {
                name: p.name.trim().to_string(),
                position: p.desired_position.trim().to_string(),
                experience: p.experience_years.trim().to_string(),
                keywords: keywords.to_string(),
            },
            None => GenerateRequest::Plain {
                keywords: keywords.to_string(),
            },
        };

        let result = self
            .gateway
            .generate_resume(&request)
            .await
            .map_err(|e| report(e, "generate resume"))?;

        info!("Generated resume received");
        Ok(self.generated.insert(result).as_str())
    }

    fn validate_draft(&self) -> Result<(), ValidationError> {
        let len = self.draft.trim().chars().count();
        if len == 0 {
            return Err(ValidationError::MissingField("text"));
        }
        if len < MIN_DRAFT_CHARS {
            return Err(ValidationError::TextLength {
                len,
                min: MIN_DRAFT_CHARS,
                max: MAX_DRAFT_CHARS,
            });
        }
        Ok(())
    }
}
