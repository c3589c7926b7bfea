//! API route configuration.

use crate::api::handlers::{create_paste_handler, get_paste_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Paste API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /pastes`             - Create a paste
/// - `GET  /pastes/{shortlink}` - Paste content and metadata as JSON
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/pastes", post(create_paste_handler))
        .route("/pastes/{shortlink}", get(get_paste_handler))
}
