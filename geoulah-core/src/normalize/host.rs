//! Head of the page a chapter fragment is embedded in

/// Stylesheet links the reader page carries in its `<head>`.
///
/// A chapter page keeps one of these across re-renders, so normalizing the
/// same fragment again never produces a second link to the same sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostDocument {
    stylesheets: Vec<String>,
}

impl HostDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a link to exactly `href` is already present
    pub fn has_stylesheet(&self, href: &str) -> bool {
        self.stylesheets.iter().any(|s| s == href)
    }

    /// Append a stylesheet link unless one with the same `href` exists.
    /// Returns whether a link was added.
    pub fn append_stylesheet(&mut self, href: &str) -> bool {
        if self.has_stylesheet(href) {
            return false;
        }
        self.stylesheets.push(href.to_string());
        true
    }

    /// Stylesheet hrefs in insertion order
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }
}
