//! Error types shared by the domain, application, and HTTP layers.
//!
//! [`PasteError`] holds the named failure kinds of the paste lifecycle. Each
//! variant carries the shortlink involved so callers can pattern-match on it
//! and log it. [`AppError`] wraps it together with generic request and
//! infrastructure failures and renders everything as a JSON error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Named failures of paste creation and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    /// Every candidate produced within the retry bound collided.
    #[error("Failed to generate unique shortlink after {attempts} attempts")]
    GenerationExhausted {
        attempts: usize,
        last_candidate: String,
    },

    #[error("Paste not found with shortlink: {shortlink}")]
    NotFound { shortlink: String },

    #[error("Paste expired with shortlink: {shortlink}")]
    Expired { shortlink: String },
}

impl PasteError {
    pub fn not_found(shortlink: impl Into<String>) -> Self {
        Self::NotFound {
            shortlink: shortlink.into(),
        }
    }

    pub fn expired(shortlink: impl Into<String>) -> Self {
        Self::Expired {
            shortlink: shortlink.into(),
        }
    }

    /// The shortlink this failure refers to.
    pub fn shortlink(&self) -> &str {
        match self {
            Self::GenerationExhausted { last_candidate, .. } => last_candidate,
            Self::NotFound { shortlink } | Self::Expired { shortlink } => shortlink,
        }
    }
}

/// Serialized error payload: `{"error": {"code", "message", "details"}}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },

    #[error(transparent)]
    Paste(#[from] PasteError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for a storage-level duplicate-key rejection.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Paste(PasteError::GenerationExhausted { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Paste(PasteError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Paste(PasteError::Expired { .. }) => StatusCode::GONE,
        }
    }

    /// Converts the error into its serializable form.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::Validation { details, .. } => ("validation_error", details.clone()),
            AppError::NotFound { details, .. } => ("not_found", details.clone()),
            AppError::Conflict { details, .. } => ("conflict", details.clone()),
            AppError::Internal { details, .. } => ("internal_error", details.clone()),
            AppError::Paste(PasteError::GenerationExhausted { attempts, .. }) => (
                "shortlink_generation_failed",
                json!({ "attempts": attempts }),
            ),
            AppError::Paste(PasteError::NotFound { shortlink }) => {
                ("paste_not_found", json!({ "shortlink": shortlink }))
            }
            AppError::Paste(PasteError::Expired { shortlink }) => {
                ("paste_expired", json!({ "shortlink": shortlink }))
            }
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_error_messages() {
        assert_eq!(
            PasteError::not_found("abc1234").to_string(),
            "Paste not found with shortlink: abc1234"
        );
        assert_eq!(
            PasteError::expired("abc1234").to_string(),
            "Paste expired with shortlink: abc1234"
        );

        let exhausted = PasteError::GenerationExhausted {
            attempts: 10,
            last_candidate: "zzzzzzz".to_string(),
        };
        assert_eq!(
            exhausted.to_string(),
            "Failed to generate unique shortlink after 10 attempts"
        );
        assert_eq!(exhausted.shortlink(), "zzzzzzz");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::from(PasteError::not_found("a")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PasteError::expired("a")).status_code(),
            StatusCode::GONE
        );
        assert_eq!(
            AppError::from(PasteError::GenerationExhausted {
                attempts: 10,
                last_candidate: "a".to_string(),
            })
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::bad_request("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_info_carries_shortlink() {
        let info = AppError::from(PasteError::expired("Xy12345")).to_error_info();

        assert_eq!(info.code, "paste_expired");
        assert_eq!(info.details["shortlink"], "Xy12345");
        assert!(info.message.contains("Xy12345"));
    }

    #[test]
    fn test_is_conflict() {
        assert!(AppError::conflict("dup", json!({})).is_conflict());
        assert!(!AppError::internal("boom", json!({})).is_conflict());
    }
}
