//! HTTP route handlers for the Longbox API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /api/comics?search=<upc>      - Resolve a UPC to comic metadata
//! POST /api/upload                   - Scan an uploaded image for a barcode
//!
//! # Auth
//! POST /api/auth/signup              - Create account, returns {user, token}
//! POST /api/auth/login               - Log in, returns {user, token}
//! GET  /api/auth/me                  - Current user (requires bearer token)
//!
//! # Collection (all require bearer token)
//! GET    /api/collection             - List comics (starred first)
//! POST   /api/collection             - Add a comic (idempotent on UPC)
//! DELETE /api/collection             - Delete the entire collection
//! DELETE /api/collection/{upc}       - Delete one comic
//! PATCH  /api/collection/{upc}/star  - Set the starred flag
//! PUT    /api/collection/reorder     - Bulk sort-order update (atomic)
//! GET    /api/collection/export      - CSV export
//! POST   /api/collection/import      - Bulk import (JSON or CSV), returns counts
//! ```

pub mod auth;
pub mod collection;
pub mod comics;
pub mod upload;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collection::list)
                .post(collection::add)
                .delete(collection::delete_all),
        )
        .route("/export", get(collection::export))
        .route("/import", post(collection::import))
        .route("/reorder", put(collection::reorder))
        .route("/{upc}", delete(collection::delete_one))
        .route("/{upc}/star", patch(collection::star))
}

/// Create the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/comics", get(comics::search))
        .route("/api/upload", post(upload::upload))
        .nest("/api/auth", auth_routes())
        .nest("/api/collection", collection_routes())
}
