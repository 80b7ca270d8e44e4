//! Book data service
//!
//! Loads the book collection and chapter fragments from a
//! [`ContentSource`], keeps them in a time-bounded cache and answers
//! lookup and navigation queries over the loaded books.
//!
//! A failed re-fetch never drops a cached entry: an expired payload is
//! served (with a warning) until a replacement is confirmed available.

mod cache;

pub use cache::{CacheStats, Lookup, TimedCache, DEFAULT_CACHE_EXPIRY};

use crate::error::{FetchError, ServiceError};
use crate::source::{ContentSource, BOOK_LIST_PATH};
use crate::types::{Book, BookCollection, BookStatus, Chapter};
use std::sync::Arc;
use std::time::Duration;

/// Cache key of the book list
pub const BOOKS_CACHE_KEY: &str = "all-books";

fn chapter_cache_key(path: &str) -> String {
    format!("chapter-{}", path)
}

/// Fetches, caches and queries catalog data
pub struct BookService {
    source: Arc<dyn ContentSource>,
    books: TimedCache<Arc<Vec<Book>>>,
    chapters: TimedCache<Arc<str>>,
}

impl BookService {
    /// Service with the default five minute cache window
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_expiry(source, DEFAULT_CACHE_EXPIRY)
    }

    pub fn with_expiry(source: Arc<dyn ContentSource>, expiry: Duration) -> Self {
        Self {
            source,
            books: TimedCache::new(expiry),
            chapters: TimedCache::new(expiry),
        }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// All books in source order
    pub async fn get_all(&self) -> Result<Arc<Vec<Book>>, ServiceError> {
        if let Lookup::Fresh(books) = self.books.lookup(BOOKS_CACHE_KEY).await {
            tracing::debug!(count = books.len(), "book list cache hit");
            return Ok(books);
        }

        match self.fetch_books().await {
            Ok(books) => {
                let books = Arc::new(books);
                self.books.insert(BOOKS_CACHE_KEY, Arc::clone(&books)).await;
                tracing::debug!(count = books.len(), "book list fetched");
                Ok(books)
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching books");
                match self.books.any(BOOKS_CACHE_KEY).await {
                    Some(books) => {
                        tracing::warn!("using expired cache data");
                        Ok(books)
                    }
                    None => Err(ServiceError::DataUnavailable(err.to_string())),
                }
            }
        }
    }

    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
        let body = self.source.fetch_text(BOOK_LIST_PATH).await?;
        let collection: BookCollection = serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("{}: {}", BOOK_LIST_PATH, e)))?;

        let mut books = collection.books;
        for book in &mut books {
            book.normalize_keys();
        }
        Ok(books)
    }

    /// Book whose slug or id equals `identifier`
    pub async fn get_by_slug(&self, identifier: &str) -> Result<Book, ServiceError> {
        let books = self.get_all().await?;
        find_book(&books, identifier)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("book {}", identifier)))
    }

    /// Same as [`BookService::get_by_slug`]; ids and slugs are interchangeable
    pub async fn get_by_id(&self, id: &str) -> Result<Book, ServiceError> {
        self.get_by_slug(id).await
    }

    /// Books flagged as featured, in source order
    pub async fn get_featured(&self) -> Result<Vec<Book>, ServiceError> {
        let books = self.get_all().await?;
        Ok(books.iter().filter(|b| b.featured).cloned().collect())
    }

    /// Books with the given publication status, in source order
    pub async fn get_by_status(&self, status: BookStatus) -> Result<Vec<Book>, ServiceError> {
        let books = self.get_all().await?;
        Ok(books.iter().filter(|b| b.status == status).cloned().collect())
    }

    /// Raw text of a chapter fragment, cached by path
    pub async fn get_chapter_content(&self, path: &str) -> Result<Arc<str>, ServiceError> {
        let key = chapter_cache_key(path);
        if let Lookup::Fresh(content) = self.chapters.lookup(&key).await {
            tracing::debug!(path, "chapter cache hit");
            return Ok(content);
        }

        match self.source.fetch_text(path).await {
            Ok(content) => {
                let content: Arc<str> = Arc::from(content);
                self.chapters.insert(key, Arc::clone(&content)).await;
                Ok(content)
            }
            Err(err) => {
                tracing::error!(path, error = %err, "error loading chapter");
                match self.chapters.any(&key).await {
                    Some(content) => {
                        tracing::warn!(path, "using expired cache for chapter");
                        Ok(content)
                    }
                    None => Err(ServiceError::ContentUnavailable(err.to_string())),
                }
            }
        }
    }

    /// Chapter of `book` by slug or id
    pub fn get_chapter<'a>(&self, book: Option<&'a Book>, slug: &str) -> Option<&'a Chapter> {
        book?.chapter(slug)
    }

    /// Chapter after `slug`, or none at the end of the book
    pub fn get_next_chapter<'a>(&self, book: Option<&'a Book>, slug: &str) -> Option<&'a Chapter> {
        book?.next_chapter(slug)
    }

    /// Chapter before `slug`, or none at the start of the book
    pub fn get_previous_chapter<'a>(
        &self,
        book: Option<&'a Book>,
        slug: &str,
    ) -> Option<&'a Chapter> {
        book?.previous_chapter(slug)
    }

    /// Drop every cached entry; the next getter re-fetches
    pub async fn clear_cache(&self) {
        self.books.clear().await;
        self.chapters.clear().await;
    }

    /// Drop one entry by cache key (`all-books` or `chapter-{path}`)
    pub async fn remove_cache_item(&self, key: &str) -> bool {
        if key == BOOKS_CACHE_KEY {
            self.books.remove(key).await
        } else {
            self.chapters.remove(key).await
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.books.stats().await + self.chapters.stats().await
    }

    /// Warm the book list cache; failures are logged, not returned
    pub async fn preload(&self) {
        match self.get_all().await {
            Ok(books) => tracing::info!(count = books.len(), "book data preloaded"),
            Err(err) => tracing::error!(error = %err, "failed to preload book data"),
        }
    }
}

/// Book whose slug or id equals `identifier`
pub fn find_book<'a>(books: &'a [Book], identifier: &str) -> Option<&'a Book> {
    books.iter().find(|b| b.matches(identifier))
}
