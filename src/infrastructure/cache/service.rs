//! Cache service trait and error types.

use crate::domain::entities::PasteWithContent;
use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching resolved pastes by shortlink.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures should degrade to storage lookups).
/// A cached entry is never trusted for expiration: readers re-check it
/// against the current time on every hit.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a resolved paste from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(paste))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_paste(&self, shortlink: &str) -> CacheResult<Option<PasteWithContent>>;

    /// Stores a resolved paste with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `paste` - The paste and its content; keyed by `paste.paste.shortlink`
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set_paste(
        &self,
        paste: &PasteWithContent,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached paste. Used when a paste is expired or purged.
    async fn invalidate(&self, shortlink: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
