//! Error pages

use super::{escape_html, Page};
use crate::error::{RouteError, ServiceError};
use crate::i18n::I18n;
use crate::routes::{Route, CATALOG_PAGE};
use thiserror::Error;

/// Why a page could not be shown
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    /// `book.html` without `id`
    #[error("no book id given")]
    MissingBookId,

    /// `chapter.html` without `book` or `chapter`
    #[error("required parameters missing")]
    MissingParameters,

    #[error("unknown page {0}")]
    UnknownPage(String),

    #[error("book {0} not found")]
    BookNotFound(String),

    #[error("chapter {chapter} of {book} not found")]
    ChapterNotFound { book: String, chapter: String },

    /// Book list could not be loaded and nothing was cached
    #[error("book data unavailable: {0}")]
    DataUnavailable(String),

    /// Chapter fragment could not be loaded and nothing was cached
    #[error("chapter content of {book} unavailable")]
    ContentUnavailable { book: String },
}

impl PageError {
    /// HTTP status equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            PageError::MissingBookId | PageError::MissingParameters => 400,
            PageError::UnknownPage(_)
            | PageError::BookNotFound(_)
            | PageError::ChapterNotFound { .. } => 404,
            PageError::DataUnavailable(_) | PageError::ContentUnavailable { .. } => 503,
        }
    }

    /// Translation key of the message
    pub fn message_key(&self) -> &'static str {
        match self {
            PageError::MissingBookId => "errors.missingBookId",
            PageError::MissingParameters => "errors.missingParameters",
            PageError::UnknownPage(_) => "errors.general",
            PageError::BookNotFound(_) => "errors.bookNotFound",
            PageError::ChapterNotFound { .. } => "errors.chapterNotFound",
            PageError::DataUnavailable(_) | PageError::ContentUnavailable { .. } => {
                "errors.loadFailed"
            }
        }
    }

    /// Where the recovery link points and the key of its label
    pub fn back_link(&self) -> (String, &'static str) {
        match self {
            PageError::ContentUnavailable { book } => (Route::book(book).href(), "backToBook"),
            PageError::MissingParameters | PageError::ChapterNotFound { .. } => {
                (CATALOG_PAGE.to_string(), "home")
            }
            _ => (CATALOG_PAGE.to_string(), "backToCatalog"),
        }
    }

    /// Map a service failure on the book page
    pub(crate) fn for_book(err: ServiceError, id: &str) -> Self {
        match err {
            ServiceError::NotFound(_) => PageError::BookNotFound(id.to_string()),
            ServiceError::DataUnavailable(msg) => PageError::DataUnavailable(msg),
            ServiceError::ContentUnavailable(_) => PageError::ContentUnavailable {
                book: id.to_string(),
            },
        }
    }

    /// Map a service failure on the chapter page; an unknown book reads as
    /// an unknown chapter there
    pub(crate) fn for_chapter(err: ServiceError, book: &str, chapter: &str) -> Self {
        match err {
            ServiceError::NotFound(_) => PageError::ChapterNotFound {
                book: book.to_string(),
                chapter: chapter.to_string(),
            },
            ServiceError::DataUnavailable(msg) => PageError::DataUnavailable(msg),
            ServiceError::ContentUnavailable(_) => PageError::ContentUnavailable {
                book: book.to_string(),
            },
        }
    }
}

impl From<RouteError> for PageError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::MissingParameter("id") => PageError::MissingBookId,
            RouteError::MissingParameter(_) => PageError::MissingParameters,
            RouteError::UnknownPage(page) => PageError::UnknownPage(page),
        }
    }
}

/// Localized message with a link back to safety
#[derive(Debug, Clone)]
pub struct ErrorPage {
    route: Route,
    error: PageError,
}

impl ErrorPage {
    /// Error shown in place of `route`
    pub fn new(route: Route, error: PageError) -> Self {
        Self { route, error }
    }

    pub fn error(&self) -> &PageError {
        &self.error
    }
}

impl Page for ErrorPage {
    fn route(&self) -> Route {
        self.route.clone()
    }

    fn title(&self, i18n: &I18n) -> String {
        format!("{} - {}", i18n.t("error"), i18n.t("siteName"))
    }

    fn body(&self, i18n: &I18n) -> String {
        let (href, label) = self.error.back_link();
        format!(
            "<div class=\"error-message\" role=\"alert\">\n<h2>{}</h2>\n<p><a href=\"{}\" class=\"btn-primary\">{}</a></p>\n</div>\n",
            escape_html(&i18n.t(self.error.message_key())),
            escape_html(&href),
            escape_html(&i18n.t(label))
        )
    }
}
