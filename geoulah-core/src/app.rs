//! Application state and language switching
//!
//! [`App`] owns the book data service, the preference store and the
//! translator. Consumers register listeners with [`App::subscribe`]; every
//! language switch, state change and notification is delivered to them
//! synchronously, in registration order.

use crate::config::SiteConfig;
use crate::error::{GeoulahError, ServiceError};
use crate::i18n::I18n;
use crate::prefs::{PreferenceStore, PREFERRED_LANGUAGE_KEY};
use crate::service::BookService;
use crate::storage::LocalStorage;
use crate::types::{is_supported_language, Book, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
use serde::Serialize;
use std::sync::Arc;

/// Pick the starting language: URL parameter, stored preference, then the
/// primary subtag of the client locale (`fr` selects French), else Hebrew.
pub fn detect_language(
    url_param: Option<&str>,
    stored: Option<&str>,
    locale: Option<&str>,
) -> &'static str {
    let supported = |code: &str| SUPPORTED_LANGUAGES.iter().copied().find(|l| *l == code);

    if let Some(lang) = url_param.and_then(supported) {
        return lang;
    }
    if let Some(lang) = stored.and_then(supported) {
        return lang;
    }

    let primary = locale
        .and_then(|l| l.split(['-', '_']).next())
        .map(str::to_ascii_lowercase);
    match primary.as_deref() {
        Some("fr") => "fr",
        _ => DEFAULT_LANGUAGE,
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Snapshot of application state
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub books: Arc<Vec<Book>>,
    pub current_language: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            books: Arc::new(Vec::new()),
            current_language: DEFAULT_LANGUAGE.to_string(),
            is_loading: true,
            error: None,
        }
    }
}

/// Events delivered to listeners
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    LanguageChange {
        language: String,
    },
    StateChange {
        old: StateSnapshot,
        new: StateSnapshot,
    },
    Notification {
        message: String,
        level: NotificationLevel,
    },
}

/// Handle returned by [`App::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&AppEvent, &I18n) + Send>;

pub struct App {
    service: Arc<BookService>,
    prefs: PreferenceStore,
    i18n: I18n,
    state: StateSnapshot,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl App {
    pub fn new(service: Arc<BookService>, prefs: PreferenceStore, i18n: I18n) -> Self {
        let state = StateSnapshot {
            current_language: i18n.language().to_string(),
            ..StateSnapshot::default()
        };
        Self {
            service,
            prefs,
            i18n,
            state,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Wire an app from configuration: content source, cache window and an
    /// on-disk preference store.
    pub async fn from_config(config: &SiteConfig) -> Result<Self, GeoulahError> {
        let source = config.site.source()?;
        let service = Arc::new(BookService::with_expiry(source, config.cache_expiry));
        let storage = Arc::new(LocalStorage::new(&config.state_path));
        let prefs = PreferenceStore::open(storage, config.preference_prefix.clone()).await;
        Ok(Self::new(service, prefs, I18n::default()))
    }

    pub fn service(&self) -> &Arc<BookService> {
        &self.service
    }

    pub fn prefs(&self) -> &PreferenceStore {
        &self.prefs
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn language(&self) -> &str {
        self.i18n.language()
    }

    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Books from the last successful load
    pub fn books(&self) -> &[Book] {
        &self.state.books
    }

    /// Detect and apply the starting language, then load the book list.
    /// A load failure is reported as an error notification and returned.
    pub async fn init(
        &mut self,
        url_lang: Option<&str>,
        locale: Option<&str>,
    ) -> Result<(), ServiceError> {
        let stored: Option<String> = self.prefs.get(PREFERRED_LANGUAGE_KEY).await;
        let language = detect_language(url_lang, stored.as_deref(), locale);
        self.set_language(language).await;

        if let Err(err) = self.load_data().await {
            tracing::error!(error = %err, "application initialization error");
            let message = self.i18n.t("errors.general");
            self.notify(message, NotificationLevel::Error);
            return Err(err);
        }
        Ok(())
    }

    /// Switch language, persist it and tell every listener
    pub async fn set_language(&mut self, code: &str) {
        let language = if is_supported_language(code) {
            code
        } else {
            tracing::warn!(language = code, "invalid language, defaulting to 'he'");
            DEFAULT_LANGUAGE
        };

        if !self.prefs.set(PREFERRED_LANGUAGE_KEY, language).await {
            tracing::debug!(language, "language preference not persisted");
        }
        self.i18n.set_language(language);
        self.set_state(|state| state.current_language = language.to_string());
        self.emit(AppEvent::LanguageChange {
            language: language.to_string(),
        });
        tracing::info!(language, "language set");
    }

    /// Register a listener; it runs after every earlier registration
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AppEvent, &I18n) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Fetch the book list into state
    pub async fn load_data(&mut self) -> Result<(), ServiceError> {
        self.set_state(|state| state.is_loading = true);
        match self.service.get_all().await {
            Ok(books) => {
                tracing::info!(count = books.len(), "loaded books");
                self.set_state(|state| {
                    state.books = books;
                    state.is_loading = false;
                    state.error = None;
                });
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "error loading data");
                let message = err.to_string();
                self.set_state(|state| {
                    state.error = Some(message);
                    state.is_loading = false;
                });
                Err(err)
            }
        }
    }

    /// Drop cached data and load again
    pub async fn reload(&mut self) -> Result<(), ServiceError> {
        self.service.clear_cache().await;
        self.load_data().await
    }

    /// Book by slug or id
    pub async fn get_book(&self, identifier: &str) -> Result<Book, ServiceError> {
        self.service.get_by_slug(identifier).await
    }

    /// Send a notification to listeners
    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let message = message.into();
        tracing::info!(?level, %message, "notification");
        self.emit(AppEvent::Notification { message, level });
    }

    fn set_state(&mut self, update: impl FnOnce(&mut StateSnapshot)) {
        let old = self.state.clone();
        update(&mut self.state);
        let new = self.state.clone();
        self.emit(AppEvent::StateChange { old, new });
    }

    fn emit(&mut self, event: AppEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &self.i18n);
        }
    }
}
