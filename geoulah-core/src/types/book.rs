//! The Book type - one entry of the catalog

use super::{Chapter, LocalizedText};
use serde::{Deserialize, Serialize};

/// Publication status of a book
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// Published and readable
    #[default]
    Available,

    /// Announced but not yet published
    ComingSoon,
}

impl BookStatus {
    /// Wire name as used in `books.json`
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::ComingSoon => "coming_soon",
        }
    }

    /// Parse a wire name, accepting `-` in place of `_`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "available" => Some(BookStatus::Available),
            "coming_soon" => Some(BookStatus::ComingSoon),
            _ => None,
        }
    }
}

/// Alternative media block some catalog entries carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// A catalog entry as published in `data/books.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier, interchangeable with `slug` for lookups
    #[serde(default)]
    pub id: String,

    /// URL identifier
    #[serde(default)]
    pub slug: String,

    pub title: LocalizedText,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<LocalizedText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<BookMedia>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default)]
    pub status: BookStatus,

    #[serde(default)]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    /// Chapters in reading order
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Currency sign used when a book carries a price but no currency
pub const DEFAULT_CURRENCY: &str = "₪";

impl Book {
    /// Create a new book with the given slug and no chapters
    pub fn new(slug: impl Into<String>, title: LocalizedText) -> Self {
        let slug = slug.into();
        Self {
            id: slug.clone(),
            slug,
            title,
            author: String::new(),
            description: LocalizedText::default(),
            quote: None,
            cover: None,
            media: None,
            pages: None,
            price: None,
            currency: None,
            status: BookStatus::Available,
            featured: false,
            published_date: None,
            chapters: Vec::new(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Replace the chapter list
    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.chapters = chapters;
        self
    }

    /// Add a chapter at the end of the reading order
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Whether `identifier` names this book by slug or id
    pub fn matches(&self, identifier: &str) -> bool {
        self.slug == identifier || self.id == identifier
    }

    /// Fill a missing slug from the id (and vice versa), for the book and
    /// every chapter, so either key always resolves.
    pub fn normalize_keys(&mut self) {
        fill_pair(&mut self.id, &mut self.slug);
        for chapter in &mut self.chapters {
            chapter.normalize_keys();
        }
    }

    /// Cover image path: `cover`, then `media.cover`, then the
    /// conventional `images/books/{slug}/cover.png`.
    pub fn cover_path(&self) -> String {
        self.cover
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.media.as_ref().and_then(|m| m.cover.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("images/books/{}/cover.png", self.slug))
    }

    /// Price rendered with its currency sign, if the book has a price
    pub fn display_price(&self) -> Option<String> {
        let price = self.price.filter(|p| *p > 0.0)?;
        let currency = self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
        Some(format!("{} {}", price, currency))
    }

    fn position(&self, identifier: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.matches(identifier))
    }

    /// Chapter by slug or id
    pub fn chapter(&self, identifier: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.matches(identifier))
    }

    /// Chapter following `identifier` in reading order
    pub fn next_chapter(&self, identifier: &str) -> Option<&Chapter> {
        let index = self.position(identifier)?;
        self.chapters.get(index + 1)
    }

    /// Chapter preceding `identifier` in reading order
    pub fn previous_chapter(&self, identifier: &str) -> Option<&Chapter> {
        let index = self.position(identifier)?;
        index.checked_sub(1).and_then(|i| self.chapters.get(i))
    }
}

pub(crate) fn fill_pair(id: &mut String, slug: &mut String) {
    if slug.is_empty() {
        slug.clone_from(id);
    } else if id.is_empty() {
        id.clone_from(slug);
    }
}
