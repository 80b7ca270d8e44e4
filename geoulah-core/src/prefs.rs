//! Namespaced preference store
//!
//! Values are JSON documents stored under `{prefix}{key}` in a
//! [`StorageProvider`]. Whether the backend accepts writes is probed once
//! on open; an unavailable store behaves as empty and rejects writes
//! instead of failing.

use crate::storage::StorageProvider;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Namespace applied to every key
pub const DEFAULT_PREFIX: &str = "geoulah_";

/// Key of the persisted language code
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

const PROBE_KEY: &str = "__storage_test__";

pub struct PreferenceStore {
    storage: Arc<dyn StorageProvider>,
    prefix: String,
    available: bool,
}

impl PreferenceStore {
    /// Open a store over `storage`, probing it with a sentinel write
    pub async fn open(storage: Arc<dyn StorageProvider>, prefix: impl Into<String>) -> Self {
        let available = probe(storage.as_ref()).await;
        Self {
            storage,
            prefix: prefix.into(),
            available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Stored value for `key`; `None` when absent, unreadable or unavailable
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.available {
            return None;
        }
        let bytes = self.storage.read(&self.key(key)).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(key, error = %err, "error reading preference");
                None
            }
        }
    }

    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).await.unwrap_or(default)
    }

    /// Store `value` under `key`. Returns whether the write succeeded.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        if !self.available {
            return false;
        }
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(key, error = %err, "error serializing preference");
                return false;
            }
        };
        match self.storage.write(&self.key(key), bytes).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "error writing preference");
                false
            }
        }
    }

    /// Remove `key`; removing an absent key succeeds
    pub async fn remove(&self, key: &str) -> bool {
        if !self.available {
            return false;
        }
        match self.storage.delete(&self.key(key)).await {
            Ok(()) | Err(crate::error::StorageError::NotFound(_)) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "error removing preference");
                false
            }
        }
    }

    /// Remove every key under this store's prefix
    pub async fn clear(&self) -> bool {
        if !self.available {
            return false;
        }
        let mut cleared = true;
        for key in self.keys().await {
            cleared &= self.remove(&key).await;
        }
        cleared
    }

    pub async fn has(&self, key: &str) -> bool {
        if !self.available {
            return false;
        }
        self.storage.exists(&self.key(key)).await.unwrap_or(false)
    }

    /// Keys under this store's prefix, with the prefix stripped
    pub async fn keys(&self) -> Vec<String> {
        if !self.available {
            return Vec::new();
        }
        match self.storage.list(&self.prefix).await {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
                .collect(),
            Err(err) => {
                tracing::error!(error = %err, "error listing preferences");
                Vec::new()
            }
        }
    }

    /// Approximate size in bytes of every prefixed key and value
    pub async fn size(&self) -> usize {
        let mut size = 0;
        for key in self.keys().await {
            let full = self.key(&key);
            let value_len = self.storage.read(&full).await.map(|v| v.len()).unwrap_or(0);
            size += full.len() + value_len;
        }
        size
    }
}

async fn probe(storage: &dyn StorageProvider) -> bool {
    let result = async {
        storage.write(PROBE_KEY, PROBE_KEY.as_bytes().to_vec()).await?;
        storage.delete(PROBE_KEY).await
    }
    .await;

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "preference storage is not available");
            false
        }
    }
}
