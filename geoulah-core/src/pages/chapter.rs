//! Chapter reader page

use super::{escape_html, Page, PageError};
use crate::i18n::I18n;
use crate::normalize::{ContentNormalizer, HostDocument};
use crate::routes::Route;
use crate::service::BookService;
use crate::types::{Book, Chapter};

/// A chapter with its normalized fragment.
///
/// The fragment is fetched and normalized once; rendering in another
/// language reuses it.
#[derive(Debug, Clone)]
pub struct ChapterPage {
    book: Book,
    chapter: Chapter,
    content: String,
    host: HostDocument,
}

impl ChapterPage {
    /// Normalize `raw` for `chapter` of `book` against `host`
    pub fn new(book: Book, chapter: Chapter, raw: &str, mut host: HostDocument) -> Self {
        let content = ContentNormalizer::new().normalize(raw, &book, &mut host);
        Self {
            book,
            chapter,
            content,
            host,
        }
    }

    pub async fn load(
        service: &BookService,
        book_id: &str,
        chapter_id: &str,
    ) -> Result<Self, PageError> {
        Self::load_into(service, book_id, chapter_id, HostDocument::new()).await
    }

    /// Load against an existing host document, keeping its stylesheets
    pub async fn load_into(
        service: &BookService,
        book_id: &str,
        chapter_id: &str,
        host: HostDocument,
    ) -> Result<Self, PageError> {
        let book = service
            .get_by_slug(book_id)
            .await
            .map_err(|e| PageError::for_chapter(e, book_id, chapter_id))?;

        let chapter = service
            .get_chapter(Some(&book), chapter_id)
            .cloned()
            .ok_or_else(|| PageError::ChapterNotFound {
                book: book_id.to_string(),
                chapter: chapter_id.to_string(),
            })?;

        let raw = service
            .get_chapter_content(&chapter.content_file)
            .await
            .map_err(|e| PageError::for_chapter(e, &book.slug, chapter_id))?;

        Ok(Self::new(book, chapter, &raw, host))
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    /// Normalized fragment
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn host(&self) -> &HostDocument {
        &self.host
    }

    fn render_navigation(&self, i18n: &I18n) -> String {
        let book = &self.book;
        // Arrows point the way the text reads
        let (prev_arrow, next_arrow) = if i18n.is_rtl(None) {
            ("→", "←")
        } else {
            ("←", "→")
        };

        let mut html = format!(
            "<nav class=\"chapter-navigation\" aria-label=\"{}\">\n",
            escape_html(&i18n.t("chapterNavigation"))
        );
        match book.previous_chapter(&self.chapter.slug) {
            Some(prev) => html.push_str(&format!(
                "<a href=\"{}\" class=\"nav-btn nav-btn-prev\"><span aria-hidden=\"true\">{}</span> <span>{}</span></a>\n",
                escape_html(&Route::chapter(&book.slug, &prev.slug).href()),
                prev_arrow,
                escape_html(&i18n.t("previousChapter"))
            )),
            None => html.push_str("<div></div>\n"),
        }
        html.push_str(&format!(
            "<a href=\"{}\" class=\"nav-btn nav-btn-toc\">{}</a>\n",
            escape_html(&Route::book(&book.slug).href()),
            escape_html(&i18n.t("tableOfContents"))
        ));
        match book.next_chapter(&self.chapter.slug) {
            Some(next) => html.push_str(&format!(
                "<a href=\"{}\" class=\"nav-btn nav-btn-next\"><span>{}</span> <span aria-hidden=\"true\">{}</span></a>\n",
                escape_html(&Route::chapter(&book.slug, &next.slug).href()),
                escape_html(&i18n.t("nextChapter")),
                next_arrow
            )),
            None => html.push_str("<div></div>\n"),
        }
        html.push_str("</nav>\n");
        html
    }
}

impl Page for ChapterPage {
    fn route(&self) -> Route {
        Route::chapter(&self.book.slug, &self.chapter.slug)
    }

    fn title(&self, i18n: &I18n) -> String {
        let lang = i18n.language();
        format!(
            "{} - {} - {}",
            self.chapter.title.resolve(lang),
            self.book.title.resolve(lang),
            i18n.t("siteName")
        )
    }

    fn body(&self, i18n: &I18n) -> String {
        let lang = i18n.language();
        let mut html = String::from("<div class=\"chapter-container\">\n");
        html.push_str(&format!(
            "<nav class=\"breadcrumbs\"><a href=\"{}\">{}</a> / <span>{}</span></nav>\n",
            escape_html(&Route::book(&self.book.slug).href()),
            escape_html(self.book.title.resolve(lang)),
            escape_html(self.chapter.title.resolve(lang))
        ));
        html.push_str(&format!(
            "<header class=\"chapter-header\">\n<h1 class=\"chapter-title\">{}</h1>\n<p class=\"chapter-meta\">{} - {}</p>\n</header>\n",
            escape_html(self.chapter.title.resolve(lang)),
            escape_html(self.book.title.resolve(lang)),
            escape_html(&self.book.author)
        ));
        html.push_str("<article class=\"chapter-content\">\n");
        html.push_str(&self.content);
        html.push_str("\n</article>\n");
        html.push_str(&self.render_navigation(i18n));
        html.push_str("</div>\n");
        html
    }

    fn stylesheets(&self) -> &[String] {
        self.host.stylesheets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;

    fn book() -> Book {
        Book::new("foo", LocalizedText::single("he", "ספר").with("fr", "Livre")).with_chapters(vec![
            Chapter::new("a", LocalizedText::single("he", "א"), "content/foo/a.html"),
            Chapter::new("b", LocalizedText::single("he", "ב"), "content/foo/b.html"),
            Chapter::new("c", LocalizedText::single("he", "ג"), "content/foo/c.html"),
        ])
    }

    fn page(slug: &str) -> ChapterPage {
        let book = book();
        let chapter = book.chapter(slug).cloned().unwrap();
        let raw = r#"<html><head><link rel="stylesheet" href="style.css"></head>
<body><div id="entete">old header</div><div class="chapter-content"><p>text</p><a href="c.html">next</a></div></body></html>"#;
        ChapterPage::new(book, chapter, raw, HostDocument::new())
    }

    #[test]
    fn test_first_chapter_has_no_previous() {
        let page = page("a");
        let body = page.body(&I18n::default());
        assert!(!body.contains("nav-btn-prev"));
        assert!(body
            .contains("href=\"chapter.html?book=foo&amp;chapter=b\" class=\"nav-btn nav-btn-next\""));
    }

    #[test]
    fn test_arrows_follow_direction() {
        let page = page("b");
        let mut i18n = I18n::default();
        let rtl = page.body(&i18n);
        assert!(rtl.contains("<span aria-hidden=\"true\">→</span> <span>פרק קודם</span>"));

        i18n.set_language("fr");
        let ltr = page.body(&i18n);
        assert!(
            ltr.contains("<span aria-hidden=\"true\">←</span> <span>Chapitre précédent</span>")
        );
        assert!(ltr.contains("<span>Chapitre suivant</span> <span aria-hidden=\"true\">→</span>"));
    }

    #[test]
    fn test_content_is_normalized_once() {
        let page = page("a");
        assert!(page.content().contains("<p>text</p>"));
        assert!(!page.content().contains("old header"));
        assert_eq!(page.stylesheets(), &["content/foo/style.css".to_string()]);

        let mut i18n = I18n::default();
        let he = page.body(&i18n);
        i18n.set_language("fr");
        let fr = page.body(&i18n);
        assert!(he.contains(page.content()) && fr.contains(page.content()));
        assert_eq!(page.title(&i18n), "א - Livre - Geoulah Books");
    }
}
