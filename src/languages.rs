//! Languages
//!
//! The storefront is published in English, Russian and Kyrgyz. Requests carry a
//! plain language code; anything outside the supported set is still accepted
//! by the resolver (it just falls back), so parsing here never has to fail hard.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A language the catalog is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (`en`)
    English,

    /// Russian (`ru`), the default storefront language
    Russian,

    /// Kyrgyz (`ky`)
    Kyrgyz,
}

/// Returned when a code is not one of the supported languages.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language code: {0:?}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    /// All supported languages, in admin display order.
    pub const ALL: [Language; 3] = [Language::English, Language::Russian, Language::Kyrgyz];

    /// Language used when nothing else is requested.
    pub const DEFAULT: Language = Language::Russian;

    /// ISO 639-1 code.
    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Kyrgyz => "ky",
        }
    }

    /// Look up a supported language by code, ignoring case and surrounding
    /// whitespace.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();

        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}
