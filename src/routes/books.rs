//! Catalog routes.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use models::book::Book;

use super::auth::MaybeToken;
use super::error::ApiError;
use crate::state::AppState;

/// `GET /api/books`: every catalog row, in stored order.
///
/// Filtering and ordering happen in the views so search stays instant.
pub async fn list_books(State(state): State<AppState>, MaybeToken(token): MaybeToken) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state
        .backend
        .list_books(token.as_deref())
        .await
        .inspect_err(|e| warn!(error = %e, "catalog fetch failed"))?;
    Ok(Json(books))
}

#[cfg(test)]
#[path = "books_test.rs"]
mod tests;
