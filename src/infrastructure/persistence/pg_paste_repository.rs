//! PostgreSQL implementation of paste repository.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPaste, Paste};
use crate::domain::repositories::PasteRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_shortlink;

/// PostgreSQL repository for paste records.
///
/// The primary key on `pastes.shortlink` is what finally guarantees
/// uniqueness; [`PasteRepository::create`] reports its violation as
/// [`AppError::Conflict`].
pub struct PgPasteRepository {
    pool: Arc<PgPool>,
}

impl PgPasteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasteRepository for PgPasteRepository {
    async fn exists_by_shortlink(&self, shortlink: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pastes WHERE shortlink = $1)")
                .bind(shortlink)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_paste: NewPaste) -> Result<Paste, AppError> {
        let result = sqlx::query_as::<_, Paste>(
            r#"
            INSERT INTO pastes (shortlink, expiration_length_in_minutes, created_at, paste_path)
            VALUES ($1, $2, $3, $4)
            RETURNING shortlink, expiration_length_in_minutes, created_at, paste_path
            "#,
        )
        .bind(&new_paste.shortlink)
        .bind(new_paste.expiration_length_in_minutes)
        .bind(new_paste.created_at)
        .bind(&new_paste.paste_path)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(paste) => Ok(paste),
            Err(e) if is_unique_violation_on_shortlink(&e) => Err(AppError::conflict(
                "Shortlink already exists",
                json!({ "shortlink": new_paste.shortlink }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_shortlink(&self, shortlink: &str) -> Result<Option<Paste>, AppError> {
        let paste = sqlx::query_as::<_, Paste>(
            r#"
            SELECT shortlink, expiration_length_in_minutes, created_at, paste_path
            FROM pastes
            WHERE shortlink = $1
            "#,
        )
        .bind(shortlink)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(paste)
    }

    async fn find_expired(&self, now: NaiveDateTime, limit: i64) -> Result<Vec<Paste>, AppError> {
        let pastes = sqlx::query_as::<_, Paste>(
            r#"
            SELECT shortlink, expiration_length_in_minutes, created_at, paste_path
            FROM pastes
            WHERE expiration_length_in_minutes IS NOT NULL
              AND created_at + make_interval(mins => expiration_length_in_minutes) < $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(pastes)
    }

    async fn delete(&self, shortlink: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pastes WHERE shortlink = $1")
            .bind(shortlink)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pastes")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
