//! Target companies and the positions applied for.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Keywords kept per company.
pub const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub position: String,
    pub keywords: Vec<String>,
}

/// Form input for adding or editing a company. Keywords are comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub position: String,
    pub keywords: String,
}

impl CompanyForm {
    pub fn new(name: &str, position: &str, keywords: &str) -> Self {
        Self {
            name: name.to_string(),
            position: position.to_string(),
            keywords: keywords.to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("company"));
        }
        if self.position.trim().is_empty() {
            return Err(ValidationError::MissingField("position"));
        }
        Ok(())
    }
}

/// Splits on commas, trims, drops blanks and keeps the first [`MAX_KEYWORDS`].
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
pub struct CompanyBook {
    companies: Vec<Company>,
    next_id: u64,
}

impl CompanyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_companies(companies: Vec<Company>) -> Self {
        let next_id = companies
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { companies, next_id }
    }

    pub fn add(&mut self, form: &CompanyForm) -> Result<&Company, ValidationError> {
        form.validate()?;
        self.next_id += 1;
        self.companies.push(Company {
            id: self.next_id.to_string(),
            name: form.name.trim().to_string(),
            position: form.position.trim().to_string(),
            keywords: parse_keywords(&form.keywords),
        });
        Ok(&self.companies[self.companies.len() - 1])
    }

    pub fn update(&mut self, id: &str, form: &CompanyForm) -> Result<&Company, ValidationError> {
        form.validate()?;
        let company = self
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ValidationError::UnknownCompany(id.to_string()))?;
        company.name = form.name.trim().to_string();
        company.position = form.position.trim().to_string();
        company.keywords = parse_keywords(&form.keywords);
        Ok(company)
    }

    pub fn remove(&mut self, id: &str) -> Result<Company, ValidationError> {
        let index = self
            .companies
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ValidationError::UnknownCompany(id.to_string()))?;
        Ok(self.companies.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Company> {
        let name = name.trim();
        self.companies.iter().find(|c| c.name == name)
    }

    pub fn list(&self) -> &[Company] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Form pre-filled for editing `id`.
    pub fn edit_form(&self, id: &str) -> Option<CompanyForm> {
        self.get(id).map(|c| CompanyForm {
            name: c.name.clone(),
            position: c.position.clone(),
            keywords: c.keywords.join(", "),
        })
    }
}
