//! Catalog JSON API handlers

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use geoulah_core::service::CacheStats;
use geoulah_core::{Book, BookStatus, Chapter, ServiceError};
use serde::{Deserialize, Serialize};

/// Query parameters for listing books
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Only books flagged as featured
    #[serde(default)]
    pub featured: bool,

    /// Only books with this status (`available`, `coming_soon`)
    pub status: Option<String>,
}

/// List books response
#[derive(Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

/// One chapter with its neighbours in reading order
#[derive(Serialize)]
pub struct ChapterResponse {
    pub book: String,
    pub chapter: Chapter,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Response to a cache reset
#[derive(Serialize)]
pub struct CacheClearedResponse {
    pub cleared: bool,
    pub books: usize,
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::DataUnavailable(_) | ServiceError::ContentUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn service_error(err: ServiceError) -> (StatusCode, String) {
    (service_status(&err), err.to_string())
}

/// List books in catalog order
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<ListBooksResponse>, (StatusCode, String)> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(BookStatus::parse(raw).ok_or_else(|| {
            (StatusCode::BAD_REQUEST, format!("Unknown status: {}", raw))
        })?),
        None => None,
    };

    let books = state.service.get_all().await.map_err(service_error)?;
    let books: Vec<Book> = books
        .iter()
        .filter(|b| !query.featured || b.featured)
        .filter(|b| status.map_or(true, |s| b.status == s))
        .cloned()
        .collect();

    let total = books.len();
    Ok(Json(ListBooksResponse { books, total }))
}

/// Get a single book by slug or id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, StatusCode> {
    state
        .service
        .get_by_slug(&id)
        .await
        .map(Json)
        .map_err(|e| service_status(&e))
}

/// Chapter metadata with previous and next slugs
pub async fn get_chapter(
    State(state): State<AppState>,
    Path((id, chapter)): Path<(String, String)>,
) -> Result<Json<ChapterResponse>, StatusCode> {
    let book = state
        .service
        .get_by_slug(&id)
        .await
        .map_err(|e| service_status(&e))?;

    let service = &state.service;
    let current = service
        .get_chapter(Some(&book), &chapter)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    let previous = service
        .get_previous_chapter(Some(&book), &chapter)
        .map(|c| c.slug.clone());
    let next = service
        .get_next_chapter(Some(&book), &chapter)
        .map(|c| c.slug.clone());

    Ok(Json(ChapterResponse {
        book: book.slug.clone(),
        chapter: current,
        previous,
        next,
    }))
}

/// Cache entry counts
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.service.cache_stats().await)
}

/// Drop every cached entry and reload the book list
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<CacheClearedResponse>, (StatusCode, String)> {
    state.service.clear_cache().await;
    let books = state.service.get_all().await.map_err(service_error)?;
    tracing::info!(count = books.len(), "cache cleared and book list reloaded");

    state.broadcast(ServerEvent::CacheCleared {
        books: books.len(),
        at: chrono::Utc::now(),
    });

    Ok(Json(CacheClearedResponse {
        cleared: true,
        books: books.len(),
    }))
}
