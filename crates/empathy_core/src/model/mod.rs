//! Domain model for reference data and user-authored journal records.
//!
//! # Responsibility
//! - Define the typed shapes persisted in key-value slots.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Serialized field names stay camelCase so persisted slots remain
//!   readable by earlier app releases.
//! - User-authored records are identified by a stable string `id`.

use chrono::{DateTime, Utc};

pub mod empathy_map;
pub mod exercise;
pub mod favorite;
pub mod gratitude;
pub mod reference;
pub mod settings;
pub mod statement;
pub mod tags;
pub mod validation;

/// ISO-8601 UTC timestamp as stored in every record.
pub type Timestamp = DateTime<Utc>;

/// Returns `true` when the value is empty after trimming.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trims an optional free-text field, collapsing blank input to `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
