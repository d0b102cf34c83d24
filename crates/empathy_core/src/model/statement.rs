//! NVC statements authored through the four-step wizard.
//!
//! # Invariants
//! - `observation`, `feeling`, `need` and `request` are non-blank once saved.
//! - `date_created` never changes after the first save.

use super::settings::Language;
use super::validation::{RequiredFields, ValidationError};
use super::Timestamp;
use serde::{Deserialize, Serialize};

const ENTITY: &str = "nvc_statement";

/// Persisted observation/feeling/need/request statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvcStatement {
    pub id: String,
    pub title: String,
    pub observation: String,
    pub feeling: String,
    pub need: String,
    pub request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub date_created: Timestamp,
    pub date_modified: Timestamp,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NvcStatement {
    /// Checks the four wizard steps are filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new(ENTITY)
            .check("observation", &self.observation)
            .check("feeling", &self.feeling)
            .check("need", &self.need)
            .check("request", &self.request)
            .finish()
    }
}

/// Wizard input before ids, timestamps and default title are assigned.
///
/// `id = Some(..)` edits an existing statement; `None` creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDraft {
    pub id: Option<String>,
    pub title: String,
    pub observation: String,
    pub feeling: String,
    pub need: String,
    pub request: String,
    pub context: Option<String>,
    pub tags: Vec<String>,
}

impl StatementDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new(ENTITY)
            .check("observation", &self.observation)
            .check("feeling", &self.feeling)
            .check("need", &self.need)
            .check("request", &self.request)
            .finish()
    }

    /// Prefills the wizard for editing an existing statement.
    pub fn from_statement(statement: &NvcStatement) -> Self {
        Self {
            id: Some(statement.id.clone()),
            title: statement.title.clone(),
            observation: statement.observation.clone(),
            feeling: statement.feeling.clone(),
            need: statement.need.clone(),
            request: statement.request.clone(),
            context: statement.context.clone(),
            tags: statement.tags.clone(),
        }
    }
}
