use std::sync::Arc;

use shelf_api::{
    config::{Config, ShelfBackend},
    db::{create_redis_client, Cache, MemoryShelfStore, RedisShelfStore, ShelfStore},
    routes::{create_router, AppState},
    services::{BookSearchProvider, GoogleBooksProvider},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shelf_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = if config.uses_redis() {
        Some(create_redis_client(&config.redis_url)?)
    } else {
        None
    };

    let (cache, cache_handle) = match (&redis_client, config.search_cache_enabled) {
        (Some(client), true) => {
            let (cache, handle) = Cache::new(client.clone());
            (Some(cache), Some(handle))
        }
        _ => (None, None),
    };

    let provider: Arc<dyn BookSearchProvider> = Arc::new(GoogleBooksProvider::new(
        config.google_books_api_key.clone(),
        config.google_books_api_url.clone(),
        cache,
    ));

    let shelves: Arc<dyn ShelfStore> = match (config.shelf_backend, redis_client) {
        (ShelfBackend::Redis, Some(client)) => Arc::new(RedisShelfStore::new(client)),
        _ => Arc::new(MemoryShelfStore::new()),
    };

    let state = Arc::new(AppState::new(
        provider,
        shelves,
        config.search_language.clone(),
    ));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        shelf_backend = ?config.shelf_backend,
        search_cache = config.search_cache_enabled,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
