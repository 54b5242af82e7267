//! Collection route handlers.
//!
//! Every handler takes [`AuthUser`]; the bearer token gates the whole
//! router. Duplicate adds and imports are idempotent no-ops, never errors.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::csv;
use crate::db::{ComicRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Comic, ComicRecord};
use crate::state::AppState;

/// Body for `PATCH /api/collection/{upc}/star`.
#[derive(Debug, Deserialize)]
pub struct StarRequest {
    pub starred: bool,
}

/// One entry of a `PUT /api/collection/reorder` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    pub upc: String,
    pub sort_order: i32,
}

/// List the user's comics: starred first, then manual order.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Comic>>> {
    let comics = ComicRepository::new(state.pool())
        .list(auth.id)
        .await
        .map_err(|e| AppError::database("Failed to get collection", e))?;

    Ok(Json(comics))
}

/// Add a comic to the collection.
///
/// Idempotent insert: a duplicate UPC is a silent no-op and pre-existing
/// fields are never overwritten.
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(record): Json<ComicRecord>,
) -> Result<Json<serde_json::Value>> {
    let upc = record
        .upc()
        .ok_or_else(|| AppError::Validation("UPC required".to_string()))?
        .to_owned();

    ComicRepository::new(state.pool())
        .insert(auth.id, &upc, &record)
        .await
        .map_err(|e| AppError::database("Failed to add comic", e))?;

    Ok(Json(json!({ "success": true })))
}

/// Set the starred flag on one comic.
pub async fn star(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(upc): Path<String>,
    Json(body): Json<StarRequest>,
) -> Result<Json<serde_json::Value>> {
    let matched = ComicRepository::new(state.pool())
        .set_starred(auth.id, &upc, body.starred)
        .await
        .map_err(|e| AppError::database("Failed to update comic", e))?;

    if !matched {
        return Err(AppError::NotFound("Comic not found".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}

/// Apply a bulk sort-order update atomically: all entries or none.
pub async fn reorder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(entries): Json<Vec<ReorderEntry>>,
) -> Result<Json<serde_json::Value>> {
    let updates: Vec<(String, i32)> = entries
        .into_iter()
        .map(|e| (e.upc, e.sort_order))
        .collect();

    ComicRepository::new(state.pool())
        .reorder(auth.id, &updates)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Comic not found".to_string()),
            other => AppError::database("Failed to reorder collection", other),
        })?;

    Ok(Json(json!({ "success": true })))
}

/// Export the collection as CSV.
pub async fn export(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let comics = ComicRepository::new(state.pool())
        .list(auth.id)
        .await
        .map_err(|e| AppError::database("Failed to export collection", e))?;

    let body = csv::render(&comics);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"collection.csv\"",
            ),
        ],
        body,
    ))
}

/// Import comic records, either a JSON array or a previously exported
/// CSV file (content type `text/csv`).
///
/// Each record goes through the same idempotent insert as Add. Records
/// without a UPC are silently dropped; duplicates count as skipped.
pub async fn import(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>> {
    let records: Vec<ComicRecord> = if is_csv(&headers) {
        csv::parse(&body)
    } else {
        serde_json::from_str(&body)
            .map_err(|e| AppError::Validation(format!("Invalid import payload: {e}")))?
    };

    let repo = ComicRepository::new(state.pool());
    let mut imported = 0u32;
    let mut skipped = 0u32;

    for record in &records {
        let Some(upc) = record.upc() else {
            continue;
        };
        let upc = upc.to_owned();

        let inserted = repo
            .insert(auth.id, &upc, record)
            .await
            .map_err(|e| AppError::database("Failed to import collection", e))?;

        if inserted {
            imported += 1;
        } else {
            skipped += 1;
        }
    }

    Ok(Json(json!({ "imported": imported, "skipped": skipped })))
}

fn is_csv(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/csv"))
}

/// Delete one comic. Reports success even if nothing matched.
pub async fn delete_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(upc): Path<String>,
) -> Result<Json<serde_json::Value>> {
    ComicRepository::new(state.pool())
        .delete(auth.id, &upc)
        .await
        .map_err(|e| AppError::database("Failed to remove comic", e))?;

    Ok(Json(json!({ "success": true })))
}

/// Delete the user's entire collection.
pub async fn delete_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>> {
    ComicRepository::new(state.pool())
        .delete_all(auth.id)
        .await
        .map_err(|e| AppError::database("Failed to clear collection", e))?;

    Ok(Json(json!({ "success": true })))
}
