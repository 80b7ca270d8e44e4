//! Chapter type representing a single readable chapter of a book

use super::book::fill_pair;
use super::LocalizedText;
use serde::{Deserialize, Serialize};

/// A single chapter of a book, backed by a legacy HTML fragment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub slug: String,

    pub title: LocalizedText,

    /// Path of the HTML fragment, relative to the site root
    #[serde(default)]
    pub content_file: String,
}

impl Chapter {
    /// Create a new chapter whose id equals its slug
    pub fn new(
        slug: impl Into<String>,
        title: LocalizedText,
        content_file: impl Into<String>,
    ) -> Self {
        let slug = slug.into();
        Self {
            id: slug.clone(),
            slug,
            title,
            content_file: content_file.into(),
        }
    }

    /// Set a distinct id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether `identifier` names this chapter by slug or id
    pub fn matches(&self, identifier: &str) -> bool {
        self.slug == identifier || self.id == identifier
    }

    pub(crate) fn normalize_keys(&mut self) {
        fill_pair(&mut self.id, &mut self.slug);
    }
}
