//! Book detail page with table of contents

use super::{escape_html, Page, PageError};
use crate::i18n::I18n;
use crate::routes::{Route, CATALOG_PAGE};
use crate::service::BookService;
use crate::types::Book;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct BookPage {
    book: Book,
}

impl BookPage {
    pub fn new(book: Book) -> Self {
        Self { book }
    }

    pub async fn load(service: &BookService, id: &str) -> Result<Self, PageError> {
        let book = service
            .get_by_slug(id)
            .await
            .map_err(|e| PageError::for_book(e, id))?;
        Ok(Self::new(book))
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// schema.org `Book` description in the active language
    pub fn structured_data(&self, i18n: &I18n) -> serde_json::Value {
        let lang = i18n.language();
        json!({
            "@context": "https://schema.org",
            "@type": "Book",
            "name": self.book.title.resolve(lang),
            "author": {
                "@type": "Person",
                "name": self.book.author,
            },
            "numberOfPages": self.book.pages,
            "inLanguage": lang,
            "datePublished": self.book.published_date,
            "description": self.book.description.get(lang),
        })
    }

    fn render_toc(&self, i18n: &I18n) -> String {
        let lang = i18n.language();
        let mut html = String::from("<div class=\"table-of-contents\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&i18n.t("tableOfContents"))));
        html.push_str("<ul class=\"toc-list\" role=\"list\">\n");
        for (index, chapter) in self.book.chapters.iter().enumerate() {
            html.push_str(&format!(
                "<li class=\"toc-item\" role=\"listitem\"><a href=\"{}\"><span class=\"chapter-number\">{}</span> <span class=\"chapter-title-text\">{}</span></a></li>\n",
                escape_html(&Route::chapter(&self.book.slug, &chapter.slug).href()),
                index + 1,
                escape_html(chapter.title.resolve(lang))
            ));
        }
        html.push_str("</ul>\n</div>\n");
        html
    }
}

impl Page for BookPage {
    fn route(&self) -> Route {
        Route::book(&self.book.slug)
    }

    fn title(&self, i18n: &I18n) -> String {
        format!(
            "{} - {}",
            self.book.title.resolve(i18n.language()),
            i18n.t("siteName")
        )
    }

    fn head(&self, i18n: &I18n) -> String {
        let description = self.book.description.resolve(i18n.language());
        // "</" must not appear inside a script element
        let schema = serde_json::to_string_pretty(&self.structured_data(i18n))
            .unwrap_or_default()
            .replace("</", "<\\/");
        format!(
            "<meta name=\"description\" content=\"{}\">\n<script type=\"application/ld+json\" id=\"book-schema\">\n{}\n</script>\n",
            escape_html(description),
            schema
        )
    }

    fn body(&self, i18n: &I18n) -> String {
        let book = &self.book;
        let lang = i18n.language();
        let title = book.title.resolve(lang);

        let mut html = String::from("<div id=\"book-content\">\n<div class=\"book-header\">\n");
        html.push_str(&format!(
            "<div class=\"book-cover\"><img src=\"{}\" alt=\"{}\" class=\"book-cover-large\" loading=\"eager\"></div>\n",
            escape_html(&book.cover_path()),
            escape_html(&i18n.t_with("a11y.imageAlt", &[("title", title)]))
        ));
        html.push_str("<div class=\"book-info\">\n");
        html.push_str(&format!("<h1 class=\"book-title\">{}</h1>\n", escape_html(title)));
        html.push_str(&format!(
            "<p class=\"book-author\"><strong>{}:</strong> {}</p>\n",
            escape_html(&i18n.t("author")),
            escape_html(&book.author)
        ));
        if let Some(quote) = book.quote.as_ref().and_then(|q| q.get(lang)) {
            html.push_str(&format!(
                "<blockquote class=\"book-quote\">{}</blockquote>\n",
                escape_html(quote)
            ));
        }
        if let Some(description) = book.description.get(lang) {
            html.push_str(&format!(
                "<p class=\"book-description\">{}</p>\n",
                escape_html(description)
            ));
        }

        html.push_str("<div class=\"book-meta\">\n");
        if let Some(pages) = book.pages {
            html.push_str(&format!(
                "<div class=\"meta-item\"><div class=\"meta-label\">{}</div><div class=\"meta-value\">{}</div></div>\n",
                escape_html(&i18n.t("pages")),
                pages
            ));
        }
        if let Some(price) = book.display_price() {
            html.push_str(&format!(
                "<div class=\"meta-item\"><div class=\"meta-label\">{}</div><div class=\"meta-value\">{}</div></div>\n",
                escape_html(&i18n.t("price")),
                escape_html(&price)
            ));
        }
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<div class=\"book-actions\">\n<a href=\"purchase.html?book={}\" class=\"btn-primary\">{}</a>\n<a href=\"{}\" class=\"btn-secondary\">{}</a>\n</div>\n",
            escape_html(&book.slug),
            escape_html(&i18n.t("buyNow")),
            CATALOG_PAGE,
            escape_html(&i18n.t("backToCatalog"))
        ));
        html.push_str("</div>\n</div>\n");

        if !book.chapters.is_empty() {
            html.push_str(&self.render_toc(i18n));
        }
        html.push_str("</div>\n");
        html
    }
}
