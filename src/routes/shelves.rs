use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Collection, ShelfStats},
    routes::AppState,
};

/// Handler listing one shelf
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<Collection>,
) -> Json<Vec<Book>> {
    Json(state.shelves.list(collection).await)
}

/// Handler shelving a book
///
/// Responds 201 when the book was added and 200 when it was already there.
pub async fn add(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<Collection>,
    Json(book): Json<Book>,
) -> AppResult<(StatusCode, Json<Book>)> {
    if book.id.trim().is_empty() {
        return Err(AppError::InvalidInput("Book id cannot be empty".to_string()));
    }
    if book.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Book title cannot be empty".to_string()));
    }

    let added = state.shelves.shelve(collection, book.clone()).await?;

    tracing::info!(
        book_id = %book.id,
        collection = %collection,
        added,
        "Book shelved"
    );

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(book)))
}

/// Handler removing a book from a shelf
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(Collection, String)>,
) -> AppResult<StatusCode> {
    if state.shelves.remove(collection, &id).await? {
        tracing::info!(book_id = %id, collection = %collection, "Book removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Book {} is not on {}", id, collection)))
    }
}

/// Handler moving a book to the other shelf
pub async fn move_book(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(Collection, String)>,
) -> AppResult<Json<Book>> {
    let book = state.shelves.move_book(&id, collection).await?;
    Ok(Json(book))
}

/// Handler emptying both shelves
pub async fn clear(State(state): State<Arc<AppState>>) -> AppResult<StatusCode> {
    state.shelves.clear().await?;
    tracing::info!("Shelves cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<ShelfStats> {
    Json(state.shelves.stats().await)
}
