//! Save-time validation errors.
//!
//! This is the only error class that reaches the user: the UI turns it into
//! a confirmation prompt naming the offending fields.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are blank.
    MissingFields {
        entity: &'static str,
        fields: Vec<&'static str>,
    },
    /// A numeric field is outside its allowed range.
    OutOfRange {
        entity: &'static str,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// Field names the UI should highlight.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingFields { fields, .. } => fields.clone(),
            Self::OutOfRange { field, .. } => vec![*field],
        }
    }

    pub fn entity(&self) -> &'static str {
        match self {
            Self::MissingFields { entity, .. } | Self::OutOfRange { entity, .. } => *entity,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { entity, fields } => {
                write!(f, "{entity} is missing required fields: {}", fields.join(", "))
            }
            Self::OutOfRange {
                entity,
                field,
                value,
                min,
                max,
            } => write!(f, "{entity}.{field} must be within {min}..={max}, got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Collects blank required fields for one entity.
pub(crate) struct RequiredFields {
    entity: &'static str,
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn new(entity: &'static str) -> Self {
        Self {
            entity,
            missing: Vec::new(),
        }
    }

    pub(crate) fn check(mut self, field: &'static str, value: &str) -> Self {
        if super::is_blank(value) {
            self.missing.push(field);
        }
        self
    }

    pub(crate) fn check_optional(self, field: &'static str, value: Option<&str>) -> Self {
        self.check(field, value.unwrap_or_default())
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                entity: self.entity,
                fields: self.missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RequiredFields, ValidationError};

    #[test]
    fn whitespace_counts_as_missing() {
        let err = RequiredFields::new("statement")
            .check("observation", "   ")
            .check("feeling", "calm")
            .check_optional("need", None)
            .finish()
            .unwrap_err();

        assert_eq!(err.fields(), vec!["observation", "need"]);
        assert_eq!(
            err.to_string(),
            "statement is missing required fields: observation, need"
        );
    }

    #[test]
    fn out_of_range_names_the_field() {
        let err = ValidationError::OutOfRange {
            entity: "emotion",
            field: "intensity",
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(err.fields(), vec!["intensity"]);
        assert!(err.to_string().contains("1..=10"));
    }
}
