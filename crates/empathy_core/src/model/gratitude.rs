//! Gratitude journal entries.
//!
//! # Invariants
//! - `action`, `feeling` and `need` are non-blank once saved.
//! - `person_name` is required for [`GratitudeKind::Other`] and absent for
//!   [`GratitudeKind::Personal`].

use super::settings::Language;
use super::validation::{RequiredFields, ValidationError};
use super::Timestamp;
use serde::{Deserialize, Serialize};

const ENTITY: &str = "gratitude_entry";

/// Who the gratitude is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GratitudeKind {
    /// Something the user did.
    Personal,
    /// Something another person did.
    Other,
}

impl GratitudeKind {
    pub fn code(self) -> &'static str {
        match self {
            GratitudeKind::Personal => "personal",
            GratitudeKind::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(GratitudeKind::Personal),
            "other" => Some(GratitudeKind::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeEntry {
    pub id: String,
    /// Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: GratitudeKind,
    pub title: String,
    pub action: String,
    pub feeling: String,
    pub need: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    pub date_created: Timestamp,
    pub date_modified: Timestamp,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl GratitudeEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            self.kind,
            &self.action,
            &self.feeling,
            &self.need,
            self.person_name.as_deref(),
        )
    }
}

/// Form input for a gratitude entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratitudeDraft {
    pub id: Option<String>,
    pub kind: GratitudeKind,
    pub title: String,
    pub action: String,
    pub feeling: String,
    pub need: String,
    pub context: Option<String>,
    pub person_name: Option<String>,
    pub tags: Vec<String>,
}

impl GratitudeDraft {
    pub fn new(kind: GratitudeKind) -> Self {
        Self {
            id: None,
            kind,
            title: String::new(),
            action: String::new(),
            feeling: String::new(),
            need: String::new(),
            context: None,
            person_name: None,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            self.kind,
            &self.action,
            &self.feeling,
            &self.need,
            self.person_name.as_deref(),
        )
    }

    pub fn from_entry(entry: &GratitudeEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            kind: entry.kind,
            title: entry.title.clone(),
            action: entry.action.clone(),
            feeling: entry.feeling.clone(),
            need: entry.need.clone(),
            context: entry.context.clone(),
            person_name: entry.person_name.clone(),
            tags: entry.tags.clone(),
        }
    }
}

fn validate_fields(
    kind: GratitudeKind,
    action: &str,
    feeling: &str,
    need: &str,
    person_name: Option<&str>,
) -> Result<(), ValidationError> {
    let required = RequiredFields::new(ENTITY)
        .check("action", action)
        .check("feeling", feeling)
        .check("need", need);
    match kind {
        GratitudeKind::Other => required.check_optional("personName", person_name).finish(),
        GratitudeKind::Personal => required.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::{GratitudeDraft, GratitudeKind};

    fn filled(kind: GratitudeKind) -> GratitudeDraft {
        GratitudeDraft {
            action: "Cooked dinner".to_string(),
            feeling: "grateful".to_string(),
            need: "care".to_string(),
            ..GratitudeDraft::new(kind)
        }
    }

    #[test]
    fn other_requires_person_name() {
        let mut draft = filled(GratitudeKind::Other);
        draft.person_name = Some("  ".to_string());
        assert_eq!(draft.validate().unwrap_err().fields(), vec!["personName"]);

        draft.person_name = Some("Ona".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn personal_ignores_person_name() {
        assert!(filled(GratitudeKind::Personal).validate().is_ok());
    }
}
