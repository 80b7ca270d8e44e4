//! HTTP routes

use crate::handlers;
use crate::state::AppState;
use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Origins allowed when `GEOULAH_CORS_ORIGINS` is unset
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

fn cors_layer() -> CorsLayer {
    // GEOULAH_CORS_ORIGINS is a comma-separated list of origins, or "*"
    let origins = match std::env::var("GEOULAH_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(
            origins
                .split(',')
                .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ),
        None => AllowOrigin::list(DEV_ORIGINS.map(HeaderValue::from_static)),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/books", get(handlers::list_books))
        .route("/books/:id", get(handlers::get_book))
        .route("/books/:id/chapters/:chapter", get(handlers::get_chapter))
        .route(
            "/cache",
            get(handlers::cache_stats).delete(handlers::clear_cache),
        )
        // SSE endpoint
        .route("/events", get(handlers::server_events));

    let mut router = Router::new()
        .route("/", get(handlers::render_page))
        .route("/index.html", get(handlers::render_page))
        .route("/book.html", get(handlers::render_page))
        .route("/chapter.html", get(handlers::render_page))
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check));

    // css, images and chapter resources come straight from the site
    if let Some(root) = state.site_root.clone() {
        router = router.fallback_service(ServeDir::new(root));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
