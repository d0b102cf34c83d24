//! App-wide preferences.
//!
//! # Invariants
//! - Persisted settings are decoded as a [`SettingsPatch`] and merged over
//!   defaults field by field, so a field added in a later release needs no
//!   migration.
//! - The default language is derived once from the device locale.

use serde::{Deserialize, Serialize};

/// UI and content language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Lt,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Lt => "lt",
        }
    }

    /// Parses a two-letter code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "lt" => Some(Language::Lt),
            _ => None,
        }
    }

    /// Derives the default language from a device locale tag.
    ///
    /// Lithuanian when the primary language subtag is `lt` (`lt`, `lt-LT`,
    /// `lt_LT`), English for everything else including an absent locale.
    pub fn from_device_locale(locale: Option<&str>) -> Self {
        let primary = locale
            .unwrap_or_default()
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        if primary.eq_ignore_ascii_case("lt") {
            Language::Lt
        } else {
            Language::En
        }
    }
}

/// Color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Effective settings singleton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    pub language: Language,
}

impl AppSettings {
    /// Hard defaults for a first run on a device with the given locale.
    pub fn defaults_for_locale(locale: Option<&str>) -> Self {
        Self {
            theme: Theme::Light,
            language: Language::from_device_locale(locale),
        }
    }

    /// Returns a copy with every field present in `patch` overriding `self`.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            theme: patch.theme.unwrap_or(self.theme),
            language: patch.language.unwrap_or(self.language),
        }
    }
}

/// Partial settings: both the persisted shape and the update request.
///
/// Unknown fields are ignored on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl SettingsPatch {
    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Self::default()
        }
    }

    pub fn language(language: Language) -> Self {
        Self {
            language: Some(language),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.language.is_none()
    }
}

impl From<AppSettings> for SettingsPatch {
    fn from(value: AppSettings) -> Self {
        Self {
            theme: Some(value.theme),
            language: Some(value.language),
        }
    }
}
