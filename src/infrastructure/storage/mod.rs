//! Storage for paste bodies.
//!
//! Paste records only hold an opaque key (`paste_path`); the content itself
//! lives behind a [`PasteStorage`] implementation.
//!
//! - [`FsPasteStorage`] - One file per paste under a local directory

mod fs_storage;

pub use fs_storage::FsPasteStorage;

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;

/// Errors that can occur while storing or loading paste content.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("Stored object not found: {0}")]
    NotFound(String),
    #[error("Stored object is not valid UTF-8: {0}")]
    InvalidUtf8(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        tracing::error!("Paste storage error: {}", e);
        AppError::internal("Paste storage error", json!({}))
    }
}

/// Object storage for paste content.
///
/// Keys are chosen by the implementation on write and are independent of the
/// paste's shortlink, so a shortlink collision can never overwrite another
/// paste's body.
#[async_trait]
pub trait PasteStorage: Send + Sync {
    /// Stores `content` under a fresh key and returns that key.
    async fn write(&self, content: &str) -> StorageResult<String>;

    /// Loads the content stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored under `key`.
    async fn read(&self, key: &str) -> StorageResult<String>;

    /// Removes the content stored under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Checks that the backend is usable.
    async fn health_check(&self) -> bool;
}
