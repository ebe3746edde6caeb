use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Personal details entered once and reused by resume and interview prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub desired_position: String,
    pub experience_years: String,
    pub detailed_experience: String,
}

impl PersonalInfo {
    /// Only the name is mandatory.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }

    /// Share of the four fields that are filled in: 0, 25, 50, 75 or 100.
    pub fn completion_percent(&self) -> u8 {
        let filled = [
            &self.name,
            &self.desired_position,
            &self.experience_years,
            &self.detailed_experience,
        ]
        .iter()
        .filter(|f| !f.trim().is_empty())
        .count();
        (filled * 25) as u8
    }

    /// True when name, position and experience are all present, which is what
    /// the profile-aware gateway requests need.
    pub fn is_complete_for_requests(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.desired_position.trim().is_empty()
            && !self.experience_years.trim().is_empty()
    }

    pub(crate) fn summary(&self) -> String {
        let mut out = String::new();
        for (label, value) in [
            ("이름", &self.name),
            ("희망 직무", &self.desired_position),
            ("경력", &self.experience_years),
            ("상세 경력", &self.detailed_experience),
        ] {
            if !value.trim().is_empty() {
                out.push_str(&format!("{label}: {}\n", value.trim()));
            }
        }
        out
    }
}
