//! Site read from a storage provider (usually a local directory)

use super::{site_relative, ContentSource};
use crate::error::{FetchError, StorageError};
use crate::storage::{LocalStorage, StorageProvider};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Reads site resources through a [`StorageProvider`]
pub struct StorageSource {
    storage: Arc<dyn StorageProvider>,
    label: String,
}

impl StorageSource {
    pub fn new(storage: Arc<dyn StorageProvider>, label: impl Into<String>) -> Self {
        Self {
            storage,
            label: label.into(),
        }
    }

    /// Source over a site directory on disk
    pub fn local(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let label = root.display().to_string();
        Self::new(Arc::new(LocalStorage::new(root)), label)
    }
}

#[async_trait]
impl ContentSource for StorageSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let key = site_relative(path);
        let bytes = self.storage.read(key).await.map_err(|e| match e {
            StorageError::NotFound(_) => FetchError::NotFound(path.to_string()),
            StorageError::PermissionDenied(msg) => FetchError::InvalidPath(msg),
            StorageError::BackendError(msg) => FetchError::Transport(msg),
        })?;

        String::from_utf8(bytes).map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
