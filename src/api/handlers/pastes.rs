//! Handlers for creating and reading pastes.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::api::dto::paste::{CreatePasteRequest, CreatePasteResponse, PasteResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a paste.
///
/// # Endpoint
///
/// `POST /api/pastes`
///
/// # Request Body
///
/// ```json
/// {
///   "content": "fn main() {}",
///   "expiration_length_in_minutes": 60   // optional, omit for no expiry
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortlink": "aB3dE5g",
///   "url": "http://localhost:3000/aB3dE5g",
///   "created_at": "2024-01-01T00:00:00",
///   "expires_at": "2024-01-01T01:00:00"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: empty content, negative expiration, or content
///   larger than `MAX_PASTE_BYTES`
/// - **503 Service Unavailable**: no free shortlink could be generated
pub async fn create_paste_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePasteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.content.len() > state.max_paste_bytes {
        return Err(AppError::bad_request(
            "Paste content is too large",
            json!({
                "size": payload.content.len(),
                "max_size": state.max_paste_bytes,
            }),
        ));
    }

    let now = Utc::now().naive_utc();
    let paste = state
        .paste_service
        .create_paste(&payload.content, payload.expiration_length_in_minutes, now)
        .await?;

    let url = state.paste_url(&paste.shortlink);

    Ok((
        StatusCode::CREATED,
        Json(CreatePasteResponse::new(&paste, url)),
    ))
}

/// Returns a paste and its metadata as JSON.
///
/// # Endpoint
///
/// `GET /api/pastes/{shortlink}`
///
/// # Errors
///
/// - **404 Not Found**: malformed or unknown shortlink
/// - **410 Gone**: the paste has expired
pub async fn get_paste_handler(
    Path(shortlink): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PasteResponse>, AppError> {
    let now = Utc::now().naive_utc();
    let resolved = state.paste_service.get_paste(&shortlink, now).await?;

    Ok(Json(resolved.into()))
}

/// Returns the raw paste content as plain text.
///
/// # Endpoint
///
/// `GET /{shortlink}`
///
/// # Errors
///
/// Same as [`get_paste_handler`].
pub async fn raw_paste_handler(
    Path(shortlink): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now().naive_utc();
    let resolved = state.paste_service.get_paste(&shortlink, now).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        resolved.content,
    ))
}
