//! Remote site served over HTTP

use super::{site_relative, ContentSource};
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Fetches site resources relative to a base URL
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source rooted at `base`. A trailing `/` is added when
    /// missing so relative joins stay under the base path.
    pub fn new(base: Url) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(base, client))
    }

    pub fn with_client(mut base: Url, client: reqwest::Client) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base, client }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(site_relative(path))
            .map_err(|e| FetchError::InvalidPath(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, concat!("geoulah/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "text/html,application/json;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
