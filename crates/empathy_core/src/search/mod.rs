//! In-memory search over reference data and journal records.
//!
//! # Responsibility
//! - Case-insensitive substring matching shared by every list screen.
//! - Keep filtering/sorting helpers pure: no storage access, no mutation.
//!
//! # Invariants
//! - A blank query matches everything.
//! - Whitespace runs are collapsed on both sides before matching.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod journal;
pub mod reference;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Lowercases and collapses whitespace for matching.
pub fn fold_text(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}

/// Prepared search needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    folded: String,
}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: fold_text(raw),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.is_blank() || fold_text(haystack).contains(&self.folded)
    }

    /// `true` when any of the fields contains the query.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_blank() || fields.into_iter().any(|field| self.matches(field))
    }
}

#[cfg(test)]
mod tests {
    use super::{fold_text, TextQuery};

    #[test]
    fn fold_collapses_whitespace_and_case() {
        assert_eq!(fold_text("  Ačiū \n Jums "), "ačiū jums");
    }

    #[test]
    fn blank_query_matches_everything() {
        let query = TextQuery::new("   ");
        assert!(query.is_blank());
        assert!(query.matches(""));
        assert!(query.matches_any(std::iter::empty()));
    }

    #[test]
    fn lithuanian_text_matches_case_insensitively() {
        let query = TextQuery::new("DĖKINGUMAS");
        assert!(query.matches("Jaučiu dėkingumas šiandien"));
    }
}
