//! Page controllers
//!
//! Each canonical route has a controller that loads what it needs from the
//! [`BookService`] once and then renders its body for any language. A
//! language switch only re-renders; it never fetches again.

mod book;
mod catalog;
mod chapter;
mod error;

pub use book::BookPage;
pub use catalog::CatalogPage;
pub use chapter::ChapterPage;
pub use error::{ErrorPage, PageError};

use crate::i18n::I18n;
use crate::routes::{Route, CATALOG_PAGE};
use crate::service::BookService;

/// Stylesheet every page links before any chapter-specific sheet
pub const SITE_STYLESHEET: &str = "css/main.css";

/// Site-level pages listed in the header navigation, with their label keys
const NAV_LINKS: [(&str, &str); 4] = [
    (CATALOG_PAGE, "home"),
    ("about.html", "about"),
    ("purchase.html", "purchase"),
    ("contact.html", "contact"),
];

/// A renderable page
pub trait Page {
    /// Route this page answers
    fn route(&self) -> Route;

    /// Document title in the active language
    fn title(&self, i18n: &I18n) -> String;

    /// Markup placed inside `<main>`
    fn body(&self, i18n: &I18n) -> String;

    /// Extra markup for `<head>`
    fn head(&self, _i18n: &I18n) -> String {
        String::new()
    }

    /// Stylesheets the page's content registered
    fn stylesheets(&self) -> &[String] {
        &[]
    }
}

/// A loaded page that can move between threads
pub type BoxedPage = Box<dyn Page + Send + Sync>;

/// Load the controller for `route`
pub async fn load_page(service: &BookService, route: &Route) -> Result<BoxedPage, PageError> {
    match route {
        Route::Catalog => Ok(Box::new(CatalogPage::load(service).await?)),
        Route::Book { id } => Ok(Box::new(BookPage::load(service, id).await?)),
        Route::Chapter { book, chapter } => {
            Ok(Box::new(ChapterPage::load(service, book, chapter).await?))
        }
    }
}

/// Full HTML document for `page` in the active language
pub fn render_document(page: &dyn Page, i18n: &I18n) -> String {
    let language = i18n.language();
    let route = page.route();

    let mut html = String::from("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\" dir=\"{}\">\n<head>\n",
        escape_html(language),
        i18n.direction(None).as_dir()
    ));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&page.title(i18n))));
    html.push_str(&stylesheet_link(SITE_STYLESHEET));
    for href in page.stylesheets() {
        html.push_str(&stylesheet_link(href));
    }
    html.push_str(&page.head(i18n));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<a class=\"skip-link\" href=\"#main\">{}</a>\n",
        escape_html(&i18n.t("a11y.skipToMain"))
    ));
    html.push_str(&site_header(i18n, &route));
    html.push_str("<main id=\"main\">\n");
    html.push_str(&page.body(i18n));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn stylesheet_link(href: &str) -> String {
    format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
        escape_html(href)
    )
}

fn site_header(i18n: &I18n, route: &Route) -> String {
    let mut html = String::from("<header class=\"site-header\">\n");
    html.push_str(&format!(
        "<a class=\"site-logo\" href=\"{}\">{}</a>\n",
        CATALOG_PAGE,
        escape_html(&i18n.t("siteName"))
    ));

    html.push_str("<nav class=\"main-nav\">\n");
    for (href, key) in NAV_LINKS {
        html.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            href,
            escape_html(&i18n.t(key))
        ));
    }
    html.push_str("</nav>\n");

    html.push_str(&format!(
        "<nav class=\"lang-switcher\" aria-label=\"{}\">\n",
        escape_html(&i18n.t("a11y.changeLanguage"))
    ));
    for language in i18n.available_languages() {
        let active = language == i18n.language();
        html.push_str(&format!(
            "<a class=\"lang-btn{}\" lang=\"{}\" href=\"{}\" aria-pressed=\"{}\">{}</a>\n",
            if active { " active" } else { "" },
            escape_html(language),
            escape_html(&route.href_with_lang(language)),
            active,
            escape_html(&language.to_uppercase())
        ));
    }
    html.push_str("</nav>\n</header>\n");
    html
}

/// Escape text for element content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
