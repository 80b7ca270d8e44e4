//! Translation catalog
//!
//! UI strings are stored per language as a nested JSON tree and looked up
//! by dot-separated key path (`errors.bookNotFound`). A lookup never fails:
//! a missing key comes back verbatim so the page still renders.

use crate::types::{ReadingDirection, DEFAULT_LANGUAGE};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

const HEBREW: &str = include_str!("../../locales/he.json");
const FRENCH: &str = include_str!("../../locales/fr.json");

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// Replace `{name}` placeholders from `params`, leaving unknown ones in place
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures<'_>| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Outcome of walking a key path
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Text(&'a str),
    /// The path exists but ends on a subtree or non-string value
    NotText,
    Missing,
}

/// Translation trees keyed by language code
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    languages: BTreeMap<String, Map<String, Value>>,
}

impl TranslationCatalog {
    /// Catalog with no languages
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the embedded Hebrew and French trees
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (language, source) in [("he", HEBREW), ("fr", FRENCH)] {
            match serde_json::from_str::<Map<String, Value>>(source) {
                Ok(tree) => catalog.add_translations(language, tree),
                Err(err) => tracing::error!(language, error = %err, "embedded locale is invalid"),
            }
        }
        catalog
    }

    /// Merge `tree` into `language`, top-level keys replacing existing ones
    pub fn add_translations(&mut self, language: &str, tree: Map<String, Value>) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .extend(tree);
    }

    pub fn supports(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    pub fn available_languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Walk `key` through the tree for `language`
    pub fn lookup(&self, language: &str, key: &str) -> Lookup<'_> {
        let Some(tree) = self.languages.get(language) else {
            return Lookup::Missing;
        };

        let mut segments = key.split('.');
        let Some(mut node) = segments.next().and_then(|first| tree.get(first)) else {
            return Lookup::Missing;
        };
        for segment in segments {
            match node.get(segment) {
                Some(next) => node = next,
                None => return Lookup::Missing,
            }
        }

        match node.as_str() {
            Some(text) => Lookup::Text(text),
            None => Lookup::NotText,
        }
    }
}

/// Translator bound to an active language
#[derive(Debug, Clone)]
pub struct I18n {
    catalog: Arc<TranslationCatalog>,
    language: String,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(TranslationCatalog::builtin())
    }
}

impl I18n {
    /// Translator over `catalog`, starting in the default language
    pub fn new(catalog: TranslationCatalog) -> Self {
        Self::shared(Arc::new(catalog))
    }

    /// Translator over a catalog shared with other translators
    pub fn shared(catalog: Arc<TranslationCatalog>) -> Self {
        Self {
            catalog,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Shared translator switched to `code`
    pub fn for_language(catalog: Arc<TranslationCatalog>, code: &str) -> Self {
        let mut i18n = Self::shared(catalog);
        i18n.set_language(code);
        i18n
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switch the active language; an unknown code selects the default
    pub fn set_language(&mut self, code: &str) {
        if self.catalog.supports(code) {
            self.language = code.to_string();
        } else {
            tracing::warn!(
                language = code,
                fallback = DEFAULT_LANGUAGE,
                "language not supported"
            );
            self.language = DEFAULT_LANGUAGE.to_string();
        }
    }

    pub fn available_languages(&self) -> Vec<&str> {
        self.catalog.available_languages()
    }

    pub fn add_translations(&mut self, language: &str, tree: Map<String, Value>) {
        Arc::make_mut(&mut self.catalog).add_translations(language, tree);
    }

    /// Translate `key` in the active language
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate `key`, filling `{name}` placeholders from `params`
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.catalog.lookup(&self.language, key) {
            Lookup::Text(template) => interpolate(template, params),
            Lookup::NotText => {
                tracing::warn!(key, "translation key is not a string");
                key.to_string()
            }
            Lookup::Missing => {
                tracing::warn!(key, language = %self.language, "translation key not found");
                key.to_string()
            }
        }
    }

    /// Whether `code` (or the active language) is written right to left
    pub fn is_rtl(&self, code: Option<&str>) -> bool {
        self.direction(code).is_rtl()
    }

    pub fn direction(&self, code: Option<&str>) -> ReadingDirection {
        ReadingDirection::for_language(code.unwrap_or(&self.language))
    }
}
