//! Catalog search route.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use longbox_core::Upc;

use crate::error::{AppError, Result};
use crate::models::ComicMetadata;
use crate::state::AppState;

/// Query parameters for `GET /api/comics`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Resolve a UPC to comic metadata via the Metron catalog.
///
/// Validation happens before any network call: a malformed UPC never
/// costs an upstream request.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ComicMetadata>> {
    let raw = query.search.unwrap_or_default();
    let upc = Upc::parse(&raw).map_err(|e| AppError::Validation(e.to_string()))?;

    let comic = state
        .metron()
        .search_by_upc(&upc)
        .await
        .map_err(|e| AppError::upstream("Failed to search comics", e))?
        .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))?;

    Ok(Json(comic))
}
