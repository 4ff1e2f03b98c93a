use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::ShelfStore,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{BookSearchProvider, RecommendationEngine},
};

pub mod books;
pub mod recommendations;
pub mod shelves;

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn BookSearchProvider>,
    pub shelves: Arc<dyn ShelfStore>,
    pub engine: RecommendationEngine,
    /// Language restriction for searches issued by this service
    pub search_language: String,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn BookSearchProvider>,
        shelves: Arc<dyn ShelfStore>,
        search_language: impl Into<String>,
    ) -> Self {
        let search_language = search_language.into();
        Self {
            engine: RecommendationEngine::new(Arc::clone(&provider), search_language.clone()),
            provider,
            shelves,
            search_language,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Provider lookups
        .route("/books/search", get(books::search))
        .route("/books/isbn/:isbn", get(books::by_isbn))
        .route("/books/:id", get(books::by_id))
        .route("/books/:id/similar", get(books::similar))
        // Shelves
        .route("/shelves", delete(shelves::clear))
        .route(
            "/shelves/:collection",
            get(shelves::list).post(shelves::add),
        )
        .route("/shelves/:collection/:id", delete(shelves::remove))
        .route("/shelves/:collection/:id/move", post(shelves::move_book))
        .route("/stats", get(shelves::stats))
        // Recommendations
        .route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
