//! Shared fixtures for geoulah-core integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use geoulah_core::error::FetchError;
use geoulah_core::source::ContentSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub const BOOKS_JSON: &str = r#"{
  "books": [
    {
      "id": "miataisrael",
      "slug": "miataisrael",
      "title": {"he": "מאה ישראל", "fr": "Cent Israël"},
      "author": "Rav Cohen",
      "description": {"he": "תיאור", "fr": "Description"},
      "pages": 240,
      "price": 89,
      "featured": true,
      "chapters": [
        {"id": "ch1", "slug": "tanakh", "title": {"he": "תנ\"ך", "fr": "Tanakh"}, "contentFile": "content/miataisrael/tanakh.html"},
        {"id": "ch2", "slug": "talmud", "title": {"he": "תלמוד", "fr": "Talmud"}, "contentFile": "content/miataisrael/talmud.html"},
        {"id": "ch3", "slug": "zohar", "title": {"he": "זוהר"}, "contentFile": "content/miataisrael/zohar.html"}
      ]
    },
    {
      "id": "book-2",
      "title": {"he": "ספר שני"},
      "author": "Rav Levi",
      "status": "coming_soon",
      "chapters": []
    }
  ]
}"#;

pub const TANAKH_HTML: &str = r##"<html>
<head>
  <link rel="stylesheet" href="style.css">
  <link rel="stylesheet" href="https://fonts.example.org/hebrew.css">
  <script>window.legacy = true;</script>
</head>
<body>
  <div id="entete">Old banner</div>
  <div id="fleches"><a href="index.html">up</a></div>
  <div id="contenu">
    <p>Bereshit</p>
    <img src="img/map.png" alt="map">
    <img src="https://cdn.example.org/photo.jpg" alt="photo">
    <a href="talmud.html">Talmud</a>
    <a href="ch3.html">Zohar</a>
    <a href="book.html">Home</a>
    <a href="contact.html">Contact</a>
    <a href="#note1">1</a>
    <a href="unknown.html">Elsewhere</a>
    <script>track();</script>
  </div>
</body>
</html>"##;

/// In-memory source counting fetches per path, switchable to failing
#[derive(Default)]
pub struct CountingSource {
    files: Mutex<HashMap<String, String>>,
    fetches: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
    failing: AtomicBool,
}

impl CountingSource {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let source = Self::default();
        {
            let mut map = source.files.lock().unwrap();
            for (path, body) in files {
                map.insert(path.to_string(), body.to_string());
            }
        }
        source
    }

    /// Site with the standard book list and one chapter
    pub fn site() -> Self {
        Self::new(&[
            ("data/books.json", BOOKS_JSON),
            ("content/miataisrael/tanakh.html", TANAKH_HTML),
            ("content/miataisrael/talmud.html", "<article><p>Talmud</p></article>"),
        ])
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetches(&self, path: &str) -> usize {
        self.fetches.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for CountingSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("connection refused".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }

    fn describe(&self) -> String {
        "counting".to_string()
    }
}
