use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    middleware::RequestId,
    models::{Collection, Recommendations},
    routes::AppState,
};

/// Handler for recommendations endpoint
///
/// Both shelves are read once up front; later shelf changes do not affect this
/// request.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Recommendations> {
    let to_read = state.shelves.list(Collection::ToRead).await;
    let have_read = state.shelves.list(Collection::HaveRead).await;

    tracing::info!(
        request_id = %request_id,
        to_read = to_read.len(),
        have_read = have_read.len(),
        "Processing recommendation request"
    );

    let mut owned = to_read;
    owned.extend(have_read.iter().cloned());

    let recommendations = state.engine.recommend(&have_read, &owned).await;

    tracing::info!(
        request_id = %request_id,
        personalized = recommendations.personalized,
        count = recommendations.books.len(),
        "Recommendations completed"
    );

    Json(recommendations)
}
