//! Core catalog types

mod book;
mod chapter;
mod localized;

pub use book::{Book, BookMedia, BookStatus, DEFAULT_CURRENCY};
pub use chapter::Chapter;
pub use localized::{
    is_supported_language, LocalizedText, ReadingDirection, DEFAULT_LANGUAGE, RTL_LANGUAGES,
    SUPPORTED_LANGUAGES,
};

use serde::{Deserialize, Serialize};

/// Payload of the book list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookCollection {
    #[serde(default)]
    pub books: Vec<Book>,
}
