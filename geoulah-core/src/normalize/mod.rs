//! Legacy chapter fragment normalization
//!
//! Chapter files were authored for an older, self-contained site. Before a
//! fragment is embedded in the reader page its resource references and
//! internal links are rewritten into the current routing scheme and the
//! old page chrome is removed. The rules run in this order:
//!
//! 1. image sources are moved under `content/{book-id}/`
//! 2. stylesheets are registered once on the host document
//! 3. links to legacy `.html` pages become canonical routes
//! 4. scripts and legacy navigation containers are stripped
//! 5. the first known content container is extracted
//!
//! Normalization has no failure path. A rule that finds nothing to do is a
//! no-op, and a rewriter error leaves that rule's input untouched.

mod host;
mod urls;

pub use host::HostDocument;
pub use urls::is_absolute_url;

use crate::routes::Route;
use crate::types::Book;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use scraper::{Html, Selector};
use std::cell::RefCell;
use std::rc::Rc;

/// Directory holding per-book legacy resources
pub const CONTENT_PREFIX: &str = "content";

/// Extension of legacy page files
pub const LEGACY_EXTENSION: &str = ".html";

/// Legacy page names that meant "this book's home"
pub const BOOK_INDEX_PAGES: [&str; 2] = ["index", "book"];

/// Site-level pages that keep their file name
pub const SITE_PAGES: [&str; 3] = ["purchase", "contact", "about"];

/// Containers tried in order when extracting the chapter body
pub const CONTENT_CONTAINERS: [&str; 4] = [".chapter-content", "#contenu", "article", "main"];

/// Rewrites legacy chapter fragments for embedding in the reader page
#[derive(Debug, Clone, Default)]
pub struct ContentNormalizer;

impl ContentNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule in order and return the extracted fragment
    pub fn normalize(&self, raw: &str, book: &Book, host: &mut HostDocument) -> String {
        let html = self.rewrite_images(raw, book);
        let injected = self.inject_stylesheets(&html, book, host);
        let html = self.rewrite_links(&html, book);
        let html = self.strip_chrome(&html);
        let fragment = self.extract_content(&html);
        tracing::debug!(
            book = %book.slug,
            stylesheets = injected,
            raw_len = raw.len(),
            fragment_len = fragment.len(),
            "normalized chapter fragment"
        );
        fragment
    }

    /// Canonical image source for `src`, or `None` to leave it unchanged
    pub fn resolve_image(&self, src: &str, book: &Book) -> Option<String> {
        let src = src.trim().trim_start_matches("./");
        if src.is_empty()
            || is_absolute_url(src)
            || src.starts_with('/')
            || urls::is_under_content_prefix(src)
        {
            return None;
        }
        Some(urls::content_path(&book.id, src))
    }

    /// Canonical stylesheet path for `href`, or `None` for absolute and
    /// root-relative references
    pub fn resolve_stylesheet(&self, href: &str, book: &Book) -> Option<String> {
        let href = href.trim().trim_start_matches("./");
        if href.is_empty() || is_absolute_url(href) || href.starts_with('/') {
            return None;
        }
        if urls::is_under_content_prefix(href) {
            return Some(href.to_string());
        }
        Some(urls::content_path(&book.id, href))
    }

    /// Canonical target for a legacy link, or `None` to leave it unchanged
    pub fn resolve_link(&self, href: &str, book: &Book) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || is_absolute_url(href) {
            return None;
        }
        let slug = href.strip_suffix(LEGACY_EXTENSION)?;
        let slug = slug.trim_start_matches("./");

        if let Some(chapter) = book.chapter(slug) {
            return Some(Route::chapter(&book.slug, &chapter.slug).href());
        }
        if BOOK_INDEX_PAGES.contains(&slug) {
            return Some(Route::book(&book.slug).href());
        }
        if SITE_PAGES.contains(&slug) {
            return Some(format!("{}{}", slug, LEGACY_EXTENSION));
        }
        None
    }

    /// Rule 1: prefix relative image sources with the book's content path
    pub fn rewrite_images(&self, html: &str, book: &Book) -> String {
        rewrite_or_keep(
            "images",
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("img[src]", |el| {
                    if let Some(src) = el.get_attribute("src") {
                        if let Some(resolved) = self.resolve_image(&src, book) {
                            el.set_attribute("src", &resolved)?;
                        }
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
    }

    /// Rule 2: register every relative stylesheet on `host`, once per
    /// resolved path. Returns how many links were appended.
    pub fn inject_stylesheets(&self, html: &str, book: &Book, host: &mut HostDocument) -> usize {
        let found = Rc::new(RefCell::new(Vec::<String>::new()));

        rewrite_or_keep(
            "stylesheets",
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("link[href]", {
                    let found = Rc::clone(&found);
                    move |el| {
                        let is_stylesheet = el
                            .get_attribute("rel")
                            .map(|rel| {
                                rel.split_ascii_whitespace()
                                    .any(|r| r.eq_ignore_ascii_case("stylesheet"))
                            })
                            .unwrap_or(false);
                        if is_stylesheet {
                            if let Some(href) = el.get_attribute("href") {
                                found.borrow_mut().push(href);
                            }
                        }
                        Ok(())
                    }
                })],
                ..RewriteStrSettings::default()
            },
        );

        let hrefs = found.borrow();
        let appended = hrefs
            .iter()
            .filter_map(|href| self.resolve_stylesheet(href, book))
            .filter(|resolved| host.append_stylesheet(resolved))
            .count();
        appended
    }

    /// Rule 3: point links at legacy chapter pages to canonical routes
    pub fn rewrite_links(&self, html: &str, book: &Book) -> String {
        rewrite_or_keep(
            "links",
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("a[href]", |el| {
                    if let Some(href) = el.get_attribute("href") {
                        if let Some(resolved) = self.resolve_link(&href, book) {
                            if resolved != href {
                                el.set_attribute("href", &resolved)?;
                            }
                        }
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
    }

    /// Rule 4: remove scripts and legacy navigation/header containers
    pub fn strip_chrome(&self, html: &str) -> String {
        rewrite_or_keep(
            "chrome",
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!("script", |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("#fleches", |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("#entete", |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!(".nav", |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("#header", |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("#menus", |el| {
                        el.remove();
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        )
    }

    /// Rule 5: inner markup of the first content container, else of the body
    pub fn extract_content(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        for candidate in CONTENT_CONTAINERS {
            let Ok(selector) = Selector::parse(candidate) else {
                continue;
            };
            if let Some(container) = document.select(&selector).next() {
                return container.inner_html();
            }
        }

        match Selector::parse("body") {
            Ok(body) => document
                .select(&body)
                .next()
                .map(|b| b.inner_html())
                .unwrap_or_else(|| document.root_element().inner_html()),
            Err(_) => document.root_element().inner_html(),
        }
    }
}

fn rewrite_or_keep(rule: &str, html: &str, settings: RewriteStrSettings<'_, '_>) -> String {
    match rewrite_str(html, settings) {
        Ok(rewritten) => rewritten,
        Err(err) => {
            tracing::warn!(rule, error = %err, "fragment rewrite failed; keeping input");
            html.to_string()
        }
    }
}
