//! Environment configuration shared by the server and the CLI

use crate::error::ConfigError;
use crate::prefs::DEFAULT_PREFIX;
use crate::service::DEFAULT_CACHE_EXPIRY;
use crate::source::{ContentSource, HttpSource, StorageSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const SITE_VAR: &str = "GEOULAH_SITE";
pub const STATE_PATH_VAR: &str = "GEOULAH_STATE_PATH";
pub const CACHE_TTL_VAR: &str = "GEOULAH_CACHE_TTL_SECS";
pub const PREF_PREFIX_VAR: &str = "GEOULAH_PREF_PREFIX";

/// Where the static site lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLocation {
    /// Served over HTTP(S) from this base URL
    Remote(Url),
    /// A directory on disk
    Local(PathBuf),
}

impl SiteLocation {
    /// `http://` and `https://` values are remote, anything else is a path
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidSite("empty site location".to_string()));
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(value)
                .map_err(|e| ConfigError::InvalidSite(format!("{}: {}", value, e)))?;
            return Ok(SiteLocation::Remote(url));
        }
        Ok(SiteLocation::Local(PathBuf::from(value)))
    }

    /// Local root directory, if any
    pub fn local_root(&self) -> Option<&PathBuf> {
        match self {
            SiteLocation::Local(path) => Some(path),
            SiteLocation::Remote(_) => None,
        }
    }

    /// Content source reading from this location
    pub fn source(&self) -> Result<Arc<dyn ContentSource>, ConfigError> {
        match self {
            SiteLocation::Remote(url) => {
                let source = HttpSource::new(url.clone())
                    .map_err(|e| ConfigError::InvalidSite(e.to_string()))?;
                Ok(Arc::new(source))
            }
            SiteLocation::Local(path) => Ok(Arc::new(StorageSource::local(path.clone()))),
        }
    }
}

/// Settings read from `GEOULAH_*` variables
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site: SiteLocation,
    pub state_path: PathBuf,
    pub cache_expiry: Duration,
    pub preference_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteLocation::Local(PathBuf::from(".")),
            state_path: PathBuf::from("./geoulah_data"),
            cache_expiry: DEFAULT_CACHE_EXPIRY,
            preference_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl SiteConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(site) = lookup(SITE_VAR) {
            config.site = SiteLocation::parse(&site)?;
        }
        if let Some(path) = lookup(STATE_PATH_VAR) {
            config.state_path = PathBuf::from(path);
        }
        if let Some(ttl) = lookup(CACHE_TTL_VAR) {
            let secs = ttl.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: CACHE_TTL_VAR,
                value: ttl.clone(),
            })?;
            config.cache_expiry = Duration::from_secs(secs);
        }
        if let Some(prefix) = lookup(PREF_PREFIX_VAR) {
            config.preference_prefix = prefix;
        }

        Ok(config)
    }

    pub fn with_site(mut self, site: SiteLocation) -> Self {
        self.site = site;
        self
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }
}

/// Locale of the running process from `LANG`, `LC_ALL` or `LC_MESSAGES`,
/// e.g. `fr-FR` for `fr_FR.UTF-8`
pub fn system_locale() -> Option<String> {
    ["LANG", "LC_ALL", "LC_MESSAGES"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|value| {
            let locale = value.split('.').next()?.replace('_', "-");
            (!locale.is_empty()).then_some(locale)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.site, SiteLocation::Local(PathBuf::from(".")));
        assert_eq!(config.cache_expiry, Duration::from_secs(300));
        assert_eq!(config.preference_prefix, "geoulah_");
    }

    #[test]
    fn test_overrides() {
        let config = SiteConfig::from_lookup(lookup(&[
            (SITE_VAR, "https://books.example.org/"),
            (CACHE_TTL_VAR, "60"),
            (STATE_PATH_VAR, "/var/lib/geoulah"),
        ]))
        .unwrap();
        assert!(matches!(config.site, SiteLocation::Remote(_)));
        assert_eq!(config.cache_expiry, Duration::from_secs(60));
        assert_eq!(config.state_path, PathBuf::from("/var/lib/geoulah"));
    }

    #[test]
    fn test_invalid_ttl() {
        let err = SiteConfig::from_lookup(lookup(&[(CACHE_TTL_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: CACHE_TTL_VAR, .. }));
    }

    #[test]
    fn test_site_location_parse() {
        assert_eq!(
            SiteLocation::parse(" ./site ").unwrap(),
            SiteLocation::Local(PathBuf::from("./site"))
        );
        assert!(matches!(
            SiteLocation::parse("https://books.example.org/").unwrap(),
            SiteLocation::Remote(url) if url.host_str() == Some("books.example.org")
        ));

        let err = SiteLocation::parse("http://").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSite(msg) if msg.starts_with("http://: ")));
        assert!(SiteLocation::parse("  ").is_err());
    }
}
