//! Content sources the book data service fetches from

mod http;
mod storage;

pub use http::HttpSource;
pub use storage::StorageSource;

use crate::error::FetchError;
use async_trait::async_trait;

/// Path of the book list relative to the site root
pub const BOOK_LIST_PATH: &str = "data/books.json";

/// Something that can return the text of a site-relative path
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the body at `path` as UTF-8 text
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Strip leading `/` and `./` so paths resolve against the site root
pub(crate) fn site_relative(path: &str) -> &str {
    let mut path = path.trim();
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            return path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_relative() {
        assert_eq!(site_relative("/data/books.json"), "data/books.json");
        assert_eq!(site_relative("./content/a.html"), "content/a.html");
        assert_eq!(site_relative("content/a.html"), "content/a.html");
    }
}
