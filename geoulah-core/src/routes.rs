//! Canonical page routes
//!
//! The site has three pages, all driven by query parameters:
//! `index.html`, `book.html?id=<slug>` and
//! `chapter.html?book=<slug>&chapter=<chapterSlug>`.

use crate::error::RouteError;
use url::form_urlencoded;

pub const CATALOG_PAGE: &str = "index.html";
pub const BOOK_PAGE: &str = "book.html";
pub const CHAPTER_PAGE: &str = "chapter.html";

/// One of the three canonical pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Book { id: String },
    Chapter { book: String, chapter: String },
}

impl Route {
    pub fn book(id: impl Into<String>) -> Self {
        Route::Book { id: id.into() }
    }

    pub fn chapter(book: impl Into<String>, chapter: impl Into<String>) -> Self {
        Route::Chapter {
            book: book.into(),
            chapter: chapter.into(),
        }
    }

    /// Parse a request target such as `/chapter.html?book=a&chapter=b`.
    ///
    /// Unknown query parameters (including `lang`) are ignored.
    pub fn parse(target: &str) -> Result<Self, RouteError> {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let path = path.split('#').next().unwrap_or_default();
        let page = path.trim_start_matches("./").trim_start_matches('/');
        let param = |name: &str| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        };

        match page {
            "" | CATALOG_PAGE => Ok(Route::Catalog),
            BOOK_PAGE => {
                let id = param("id").ok_or(RouteError::MissingParameter("id"))?;
                Ok(Route::Book { id })
            }
            CHAPTER_PAGE => {
                let book = param("book").ok_or(RouteError::MissingParameter("book"))?;
                let chapter = param("chapter").ok_or(RouteError::MissingParameter("chapter"))?;
                Ok(Route::Chapter { book, chapter })
            }
            other => Err(RouteError::UnknownPage(other.to_string())),
        }
    }

    /// Page file name without query
    pub fn page(&self) -> &'static str {
        match self {
            Route::Catalog => CATALOG_PAGE,
            Route::Book { .. } => BOOK_PAGE,
            Route::Chapter { .. } => CHAPTER_PAGE,
        }
    }

    fn query(&self) -> form_urlencoded::Serializer<'static, String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        match self {
            Route::Catalog => {}
            Route::Book { id } => {
                query.append_pair("id", id);
            }
            Route::Chapter { book, chapter } => {
                query.append_pair("book", book);
                query.append_pair("chapter", chapter);
            }
        }
        query
    }

    /// Relative link to this page
    pub fn href(&self) -> String {
        let query = self.query().finish();
        if query.is_empty() {
            self.page().to_string()
        } else {
            format!("{}?{}", self.page(), query)
        }
    }

    /// Relative link to this page with a `lang` override
    pub fn href_with_lang(&self, language: &str) -> String {
        let mut query = self.query();
        query.append_pair("lang", language);
        format!("{}?{}", self.page(), query.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Catalog);
        assert_eq!(Route::parse("index.html?lang=fr").unwrap(), Route::Catalog);
        assert_eq!(
            Route::parse("/book.html?id=miataisrael").unwrap(),
            Route::book("miataisrael")
        );
        assert_eq!(
            Route::parse("chapter.html?book=foo&chapter=a&lang=he").unwrap(),
            Route::chapter("foo", "a")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Route::parse("book.html"),
            Err(RouteError::MissingParameter("id"))
        );
        assert_eq!(
            Route::parse("chapter.html?book=foo"),
            Err(RouteError::MissingParameter("chapter"))
        );
        assert!(matches!(
            Route::parse("purchase.html"),
            Err(RouteError::UnknownPage(_))
        ));
    }

    #[test]
    fn test_href_round_trip() {
        let route = Route::chapter("foo", "a b");
        assert_eq!(route.href(), "chapter.html?book=foo&chapter=a+b");
        assert_eq!(Route::parse(&route.href()).unwrap(), route);
        assert_eq!(Route::Catalog.href(), "index.html");
        assert_eq!(Route::book("x").href_with_lang("fr"), "book.html?id=x&lang=fr");
    }
}
