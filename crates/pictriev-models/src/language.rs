//! Languages supported for localized attribute labels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language in which identity lookup labels are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    #[default]
    En,
    Es,
    Fr,
    Id,
    It,
    Ja,
    Ko,
    Pl,
    Pt,
    Ru,
    Th,
    Tr,
    Zh,
}

impl Language {
    /// All supported languages.
    pub const ALL: &'static [Language] = &[
        Language::De,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::Id,
        Language::It,
        Language::Ja,
        Language::Ko,
        Language::Pl,
        Language::Pt,
        Language::Ru,
        Language::Th,
        Language::Tr,
        Language::Zh,
    ];

    /// Two-letter code sent as the `lang` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Id => "id",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Pl => "pl",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Th => "th",
            Language::Tr => "tr",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == code)
            .ok_or_else(|| LanguageParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unsupported language: {0}")]
pub struct LanguageParseError(String);
