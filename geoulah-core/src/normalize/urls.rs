//! Reference classification helpers

use super::CONTENT_PREFIX;
use url::Url;

/// Whether `value` carries a scheme or is protocol-relative (`//host/...`)
pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("//") || Url::parse(value).is_ok()
}

/// Whether `value` already points under `content/`
pub(crate) fn is_under_content_prefix(value: &str) -> bool {
    value
        .trim_start_matches("./")
        .strip_prefix(CONTENT_PREFIX)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// `content/{book_id}/{reference}` with a leading `./` dropped
pub(crate) fn content_path(book_id: &str, reference: &str) -> String {
    let reference = reference.trim_start_matches("./");
    format!("{}/{}/{}", CONTENT_PREFIX, book_id, reference)
}
