//! Catalog page: featured book and the grid of all books

use super::{escape_html, Page, PageError};
use crate::i18n::I18n;
use crate::routes::Route;
use crate::service::BookService;
use crate::types::{Book, BookStatus};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CatalogPage {
    books: Arc<Vec<Book>>,
}

impl CatalogPage {
    pub fn new(books: Arc<Vec<Book>>) -> Self {
        Self { books }
    }

    pub async fn load(service: &BookService) -> Result<Self, PageError> {
        let books = service
            .get_all()
            .await
            .map_err(|e| PageError::DataUnavailable(e.to_string()))?;
        Ok(Self::new(books))
    }

    /// First book flagged as featured
    pub fn featured(&self) -> Option<&Book> {
        self.books.iter().find(|b| b.featured)
    }

    fn render_featured(&self, book: &Book, i18n: &I18n) -> String {
        let lang = i18n.language();
        let title = book.title.resolve(lang);

        let mut html = String::from("<section class=\"featured-book\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&i18n.t("featuredBook"))));
        html.push_str(&format!(
            "<div class=\"featured-book-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" width=\"400\" height=\"600\"></div>\n",
            escape_html(&book.cover_path()),
            escape_html(&i18n.t_with("a11y.imageAlt", &[("title", title)]))
        ));
        html.push_str("<div class=\"featured-book-details\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(title)));
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            escape_html(&i18n.t("author")),
            escape_html(&book.author)
        ));
        if let Some(quote) = book.quote.as_ref().and_then(|q| q.get(lang)) {
            html.push_str(&format!("<blockquote>{}</blockquote>\n", escape_html(quote)));
        }
        if let Some(description) = book.description.get(lang) {
            html.push_str(&format!("<p>{}</p>\n", escape_html(description)));
        }
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
        html.push_str(&format!(
            "<a href=\"{}\" class=\"btn-primary\">{}</a>\n",
            escape_html(&Route::book(&book.slug).href()),
            escape_html(&i18n.t("readMore"))
        ));
        html.push_str("</div>\n</section>\n");
        html
    }

    fn render_card(&self, book: &Book, i18n: &I18n) -> String {
        let lang = i18n.language();
        let title = book.title.resolve(lang);

        let badge = if book.status == BookStatus::ComingSoon {
            Some(i18n.t("comingSoon"))
        } else if book.featured {
            Some(i18n.t("featuredBook"))
        } else {
            None
        };

        let mut html = String::from("<article class=\"book-card\" role=\"listitem\">\n");
        html.push_str(&format!(
            "<div class=\"book-card__image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" width=\"300\" height=\"450\">",
            escape_html(&book.cover_path()),
            escape_html(&i18n.t_with("a11y.imageAlt", &[("title", title)]))
        ));
        if let Some(badge) = badge {
            html.push_str(&format!(
                "<span class=\"book-card__badge\">{}</span>",
                escape_html(&badge)
            ));
        }
        html.push_str("</div>\n<div class=\"book-card__content\">\n");
        html.push_str(&format!(
            "<h3 class=\"book-card__title\">{}</h3>\n<p class=\"book-card__author\">{}</p>\n",
            escape_html(title),
            escape_html(&book.author)
        ));
        if let Some(description) = book.description.get(lang) {
            html.push_str(&format!(
                "<p class=\"book-card__description\">{}</p>\n",
                escape_html(description)
            ));
        }
        html.push_str("<div class=\"book-card__footer\">\n");
        if let Some(price) = book.display_price() {
            html.push_str(&format!(
                "<span class=\"book-card__price\">{}</span>\n",
                escape_html(&price)
            ));
        }
        html.push_str(&format!(
            "<a href=\"{}\" class=\"btn-secondary btn-sm\" aria-label=\"{} - {}\">{}</a>\n",
            escape_html(&Route::book(&book.slug).href()),
            escape_html(&i18n.t("viewDetails")),
            escape_html(title),
            escape_html(&i18n.t("moreDetails"))
        ));
        html.push_str("</div>\n</div>\n</article>\n");
        html
    }
}

impl Page for CatalogPage {
    fn route(&self) -> Route {
        Route::Catalog
    }

    fn title(&self, i18n: &I18n) -> String {
        i18n.t("siteTitle")
    }

    fn body(&self, i18n: &I18n) -> String {
        let mut html = String::new();
        if let Some(book) = self.featured() {
            html.push_str(&self.render_featured(book, i18n));
        }

        html.push_str(&format!(
            "<section class=\"all-books\">\n<h2>{}</h2>\n",
            escape_html(&i18n.t("allBooks"))
        ));
        if self.books.is_empty() {
            html.push_str(&format!(
                "<p class=\"empty\">{}</p>\n",
                escape_html(&i18n.t("noBooksAvailable"))
            ));
        } else {
            html.push_str("<div id=\"books-grid\" class=\"books-grid\" role=\"list\">\n");
            for book in self.books.iter() {
                html.push_str(&self.render_card(book, i18n));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;

    fn books() -> Arc<Vec<Book>> {
        let mut soon = Book::new(
            "soon",
            LocalizedText::single("he", "בקרוב").with("fr", "Bientôt"),
        );
        soon.status = BookStatus::ComingSoon;
        soon.featured = true;

        let mut priced = Book::new("priced", LocalizedText::single("he", "ספר"));
        priced.price = Some(50.0);
        priced.featured = true;

        Arc::new(vec![soon, priced])
    }

    #[test]
    fn test_badges_and_price() {
        let page = CatalogPage::new(books());
        let i18n = I18n::default();
        let body = page.body(&i18n);

        // coming soon wins over featured
        assert_eq!(body.matches("<span class=\"book-card__badge\">בקרוב</span>").count(), 1);
        assert_eq!(body.matches("<span class=\"book-card__badge\">ספר מומלץ</span>").count(), 1);
        assert!(body.contains("<span class=\"book-card__price\">50 ₪</span>"));
        assert!(body.contains("href=\"book.html?id=soon\""));
        assert_eq!(page.featured().map(|b| b.slug.as_str()), Some("soon"));
    }

    #[test]
    fn test_empty_catalog() {
        let page = CatalogPage::new(Arc::new(Vec::new()));
        let mut i18n = I18n::default();
        i18n.set_language("fr");
        let body = page.body(&i18n);
        assert!(body.contains("Aucun livre disponible actuellement"));
        assert!(!body.contains("featured-book"));
        assert_eq!(page.title(&i18n), "Geoulah Books - ספרי גאולה");
    }
}
