//! Repository trait for paste data access.

use crate::domain::entities::{NewPaste, Paste};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Repository interface for persisted pastes.
///
/// Besides plain storage this is the uniqueness oracle consulted by the
/// shortlink generator ([`Self::exists_by_shortlink`]). The oracle is
/// best-effort. Authoritative uniqueness is enforced by [`Self::create`],
/// which must reject duplicate shortlinks atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPasteRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_paste.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasteRepository: Send + Sync {
    /// Returns true if a paste with exactly this shortlink is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_shortlink(&self, shortlink: &str) -> Result<bool, AppError>;

    /// Persists a new paste.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the shortlink is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_paste: NewPaste) -> Result<Paste, AppError>;

    /// Finds a paste by its shortlink.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Paste))` if found, expired or not
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_shortlink(&self, shortlink: &str) -> Result<Option<Paste>, AppError>;

    /// Lists up to `limit` pastes whose expiration instant is before `now`,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_expired(&self, now: NaiveDateTime, limit: i64) -> Result<Vec<Paste>, AppError>;

    /// Deletes a paste record.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, shortlink: &str) -> Result<bool, AppError>;

    /// Counts all persisted pastes, expired ones included.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
