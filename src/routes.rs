//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortlink}`            - Raw paste content
//! - `GET  /health`                 - Health check: DB, storage, cache
//! - `POST /api/pastes`             - Create a paste
//! - `GET  /api/pastes/{shortlink}` - Paste as JSON
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Rejects oversized request bodies with 413
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, raw_paste_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Room left for JSON framing and escaping around the paste content.
const JSON_OVERHEAD_BYTES: usize = 64 * 1024;

/// Constructs the application router with all routes and middleware.
///
/// Request bodies are capped at `state.max_paste_bytes` plus JSON overhead;
/// the exact content size is checked again by the create handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    // Escaped JSON can be up to six bytes per content byte (`\u0000`).
    let body_limit = state
        .max_paste_bytes
        .saturating_mul(6)
        .saturating_add(JSON_OVERHEAD_BYTES);

    let router = Router::new()
        .route("/{shortlink}", get(raw_paste_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
