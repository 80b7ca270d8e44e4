//! Geoulah Core Library
//!
//! Catalog and reader logic for the Geoulah Books site: book data loading
//! with a time-bounded cache, normalization of legacy chapter fragments,
//! Hebrew/French translations, the language preference and the page
//! controllers behind the three canonical routes.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod normalize;
pub mod pages;
pub mod prefs;
pub mod routes;
pub mod service;
pub mod source;
pub mod storage;
pub mod types;

pub use app::{detect_language, App, AppEvent, ListenerId, NotificationLevel, StateSnapshot};
pub use config::{SiteConfig, SiteLocation};
pub use error::{
    ConfigError, FetchError, GeoulahError, Result, RouteError, ServiceError, StorageError,
};
pub use i18n::{I18n, TranslationCatalog};
pub use normalize::{ContentNormalizer, HostDocument};
pub use pages::{render_document, ErrorPage, Page, PageError};
pub use prefs::PreferenceStore;
pub use routes::Route;
pub use service::BookService;
pub use types::{Book, BookStatus, Chapter, LocalizedText, ReadingDirection};
