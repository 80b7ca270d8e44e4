//! Application state

use anyhow::Result;
use chrono::{DateTime, Utc};
use geoulah_core::config::SiteConfig;
use geoulah_core::prefs::PREFERRED_LANGUAGE_KEY;
use geoulah_core::{BookService, I18n, TranslationCatalog};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Book data service shared by every request
    pub service: Arc<BookService>,

    /// Name of the cookie carrying each client's language choice
    pub language_cookie: String,

    /// Translation catalog; each request gets its own translator over it
    pub catalog: Arc<TranslationCatalog>,

    /// Site directory served for static assets, when the site is local
    pub site_root: Option<PathBuf>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A request switched the preferred language
    LanguageChanged {
        language: String,
        at: DateTime<Utc>,
    },

    /// The data cache was dropped and the book list reloaded
    CacheCleared { books: usize, at: DateTime<Utc> },
}

impl AppState {
    /// Create application state from `GEOULAH_*` variables
    pub async fn new() -> Result<Self> {
        let config = SiteConfig::from_env()?;
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &SiteConfig) -> Result<Self> {
        let source = config.site.source()?;
        tracing::info!(site = %source.describe(), "using site");
        let service = Arc::new(BookService::with_expiry(source, config.cache_expiry));

        Ok(Self::from_parts(
            service,
            &config.preference_prefix,
            config.site.local_root().cloned(),
        ))
    }

    /// Assemble state from already built parts.
    ///
    /// `preference_prefix` namespaces the language cookie the same way it
    /// namespaces stored preference keys.
    pub fn from_parts(
        service: Arc<BookService>,
        preference_prefix: &str,
        site_root: Option<PathBuf>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            service,
            language_cookie: format!("{}{}", preference_prefix, PREFERRED_LANGUAGE_KEY),
            catalog: Arc::new(TranslationCatalog::builtin()),
            site_root,
            event_tx,
        }
    }

    /// Translator for one request
    pub fn translator(&self, language: &str) -> I18n {
        I18n::for_language(Arc::clone(&self.catalog), language)
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // no subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
