//! Geoulah Server - multilingual book catalog and reader

use anyhow::{Context, Result};
use geoulah_server::{routes, state};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Listen address override
const BIND_VAR: &str = "GEOULAH_BIND";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoulah_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = state::AppState::new().await?;
    state.service.preload().await;

    let app = routes::create_router(state);

    let addr: SocketAddr = match std::env::var(BIND_VAR) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid {}: {}", BIND_VAR, value))?,
        Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
    };
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
