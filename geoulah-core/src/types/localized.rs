//! Per-language text and reading direction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language used when nothing else resolves
pub const DEFAULT_LANGUAGE: &str = "he";

/// Languages the site ships translations for
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["he", "fr"];

/// Language codes written right to left
pub const RTL_LANGUAGES: [&str; 2] = ["he", "ar"];

/// Whether `code` is one of [`SUPPORTED_LANGUAGES`]
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// A string with one value per language code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with a single language value
    pub fn single(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new().with(language, text)
    }

    /// Add or replace the value for `language`
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(language.into(), text.into());
        self
    }

    /// Exact value for `language`, if present and non-empty
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .get(language)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Value for `language`, falling back to the default language, then to
    /// any value, then to the empty string.
    pub fn resolve(&self, language: &str) -> &str {
        self.get(language)
            .or_else(|| self.get(DEFAULT_LANGUAGE))
            .or_else(|| self.0.values().map(String::as_str).find(|s| !s.is_empty()))
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

/// Reading direction of a language
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReadingDirection {
    /// Left to right (Latin, Cyrillic, etc.)
    #[default]
    LeftToRight,

    /// Right to left (Hebrew, Arabic)
    RightToLeft,
}

impl ReadingDirection {
    /// Classify a language code
    pub fn for_language(code: &str) -> Self {
        if RTL_LANGUAGES.contains(&code) {
            ReadingDirection::RightToLeft
        } else {
            ReadingDirection::LeftToRight
        }
    }

    /// Value for the HTML `dir` attribute
    pub fn as_dir(&self) -> &'static str {
        match self {
            ReadingDirection::LeftToRight => "ltr",
            ReadingDirection::RightToLeft => "rtl",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, ReadingDirection::RightToLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fallback_chain() {
        let text = LocalizedText::single("he", "שלום").with("fr", "Bonjour");
        assert_eq!(text.resolve("fr"), "Bonjour");
        assert_eq!(text.resolve("en"), "שלום");

        let only_fr = LocalizedText::single("fr", "Bonjour");
        assert_eq!(only_fr.resolve("he"), "Bonjour");
        assert_eq!(LocalizedText::new().resolve("he"), "");
    }

    #[test]
    fn test_direction() {
        assert_eq!(ReadingDirection::for_language("he").as_dir(), "rtl");
        assert_eq!(ReadingDirection::for_language("ar").as_dir(), "rtl");
        assert_eq!(ReadingDirection::for_language("fr").as_dir(), "ltr");
    }
}
