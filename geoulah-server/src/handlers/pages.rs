//! Server-rendered page handlers

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use geoulah_core::pages::load_page;
use geoulah_core::types::is_supported_language;
use geoulah_core::{detect_language, render_document, ErrorPage, PageError, Route};
use serde::Deserialize;

/// Query parameters every page accepts
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
}

/// Render one of the canonical pages (catalog, book, chapter)
pub async fn render_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let (jar, language) = resolve_language(&state, jar, query.lang.as_deref(), &headers);
    let i18n = state.translator(language);

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let (status, body) = match Route::parse(target) {
        Ok(route) => match load_page(&state.service, &route).await {
            Ok(page) => (StatusCode::OK, render_document(page.as_ref(), &i18n)),
            Err(err) => error_document(route, err, &i18n),
        },
        Err(err) => error_document(Route::Catalog, PageError::from(err), &i18n),
    };

    (
        status,
        jar,
        [(header::CONTENT_LANGUAGE, language)],
        Html(body),
    )
        .into_response()
}

fn error_document(
    route: Route,
    err: PageError,
    i18n: &geoulah_core::I18n,
) -> (StatusCode, String) {
    tracing::warn!(error = %err, page = route.page(), "page failed to load");
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let page = ErrorPage::new(route, err);
    (status, render_document(&page, i18n))
}

/// Language for this request: `lang` parameter, the client's language
/// cookie, then its `Accept-Language`.
///
/// A supported `lang` parameter that differs from the cookie is written back
/// to that client's cookie and announced to event subscribers.
fn resolve_language(
    state: &AppState,
    jar: CookieJar,
    url_param: Option<&str>,
    headers: &HeaderMap,
) -> (CookieJar, &'static str) {
    let stored = jar
        .get(&state.language_cookie)
        .map(|cookie| cookie.value().to_string());
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(primary_locale);

    let language = detect_language(url_param, stored.as_deref(), accept);

    let requested = url_param.filter(|code| is_supported_language(code));
    if requested.is_none() || stored.as_deref() == Some(language) {
        return (jar, language);
    }

    tracing::info!(language, "preferred language changed");
    state.broadcast(ServerEvent::LanguageChanged {
        language: language.to_string(),
        at: chrono::Utc::now(),
    });

    let cookie = Cookie::build((state.language_cookie.clone(), language))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build();
    (jar.add(cookie), language)
}

/// First tag of an `Accept-Language` value
fn primary_locale(value: &str) -> Option<&str> {
    value
        .split(',')
        .next()
        .map(|tag| tag.split(';').next().unwrap_or(tag).trim())
        .filter(|tag| !tag.is_empty() && *tag != "*")
}
