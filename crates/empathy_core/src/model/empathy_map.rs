//! Empathy maps: a structured look at what someone thinks, feels, sees,
//! says and does, with their pains and gains.

use super::validation::{RequiredFields, ValidationError};
use super::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpathyMap {
    pub id: String,
    pub title: String,
    pub situation: String,
    pub thinks: String,
    pub feels: String,
    pub sees: String,
    pub says: String,
    pub does: String,
    pub pains: String,
    pub gains: String,
    pub date_created: Timestamp,
    pub date_modified: Timestamp,
}

impl EmpathyMap {
    /// Only the title is mandatory; every quadrant may be left empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new("empathy_map")
            .check("title", &self.title)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmpathyMapDraft {
    pub id: Option<String>,
    pub title: String,
    pub situation: String,
    pub thinks: String,
    pub feels: String,
    pub sees: String,
    pub says: String,
    pub does: String,
    pub pains: String,
    pub gains: String,
}

impl EmpathyMapDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new("empathy_map")
            .check("title", &self.title)
            .finish()
    }

    pub fn from_map(map: &EmpathyMap) -> Self {
        Self {
            id: Some(map.id.clone()),
            title: map.title.clone(),
            situation: map.situation.clone(),
            thinks: map.thinks.clone(),
            feels: map.feels.clone(),
            sees: map.sees.clone(),
            says: map.says.clone(),
            does: map.does.clone(),
            pains: map.pains.clone(),
            gains: map.gains.clone(),
        }
    }
}
