//! DTOs for paste endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Paste, PasteWithContent};

/// Request to create a paste.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePasteRequest {
    /// Paste body, stored verbatim.
    #[validate(length(min = 1, message = "Paste content must not be empty"))]
    pub content: String,

    /// Minutes after creation at which the paste expires. Absent means never.
    #[validate(range(min = 0, message = "Expiration length must not be negative"))]
    pub expiration_length_in_minutes: Option<i32>,
}

/// Response for a created paste.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    pub shortlink: String,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

impl CreatePasteResponse {
    pub fn new(paste: &Paste, url: String) -> Self {
        Self {
            shortlink: paste.shortlink.clone(),
            url,
            created_at: paste.created_at,
            expires_at: paste.expiration_time(),
        }
    }
}

/// A paste with its content.
#[derive(Debug, Serialize, Deserialize)]
pub struct PasteResponse {
    pub shortlink: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub expiration_length_in_minutes: Option<i32>,
    pub expires_at: Option<NaiveDateTime>,
}

impl From<PasteWithContent> for PasteResponse {
    fn from(resolved: PasteWithContent) -> Self {
        let expires_at = resolved.paste.expiration_time();
        let PasteWithContent { paste, content } = resolved;

        Self {
            shortlink: paste.shortlink,
            content,
            created_at: paste.created_at,
            expiration_length_in_minutes: paste.expiration_length_in_minutes,
            expires_at,
        }
    }
}
