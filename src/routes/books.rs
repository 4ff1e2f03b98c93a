use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    routes::AppState,
    services::search,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    max_results: Option<u32>,
}

/// Handler for free-text book search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = search::search_books(
        state.provider.as_ref(),
        &params.q,
        params.max_results,
        &state.search_language,
    )
    .await?;
    Ok(Json(books))
}

/// Handler for a single volume by provider id
pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.provider.get_volume(&id).await?;
    Ok(Json(book))
}

/// Handler for ISBN lookup
pub async fn by_isbn(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    state
        .provider
        .lookup_isbn(&isbn)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No book with ISBN {}", isbn)))
}

/// Handler for books similar to a volume
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<Vec<Book>>> {
    let book = state.provider.get_volume(&id).await?;
    let books = search::similar_books(
        state.provider.as_ref(),
        &book,
        params.max_results,
        &state.search_language,
    )
    .await?;
    Ok(Json(books))
}
