//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::PasteWithContent;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled.
/// All operations succeed immediately without storing or retrieving data.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_paste(&self, _shortlink: &str) -> CacheResult<Option<PasteWithContent>> {
        Ok(None)
    }

    async fn set_paste(
        &self,
        _paste: &PasteWithContent,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _shortlink: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Paste;
    use chrono::Utc;

    #[tokio::test]
    async fn test_null_cache_never_hits() {
        let cache = NullCache::new();
        let paste = PasteWithContent {
            paste: Paste::new(
                "abc1234".to_string(),
                None,
                Utc::now().naive_utc(),
                "k.txt".to_string(),
            ),
            content: "hello".to_string(),
        };

        cache.set_paste(&paste, Some(60)).await.unwrap();

        assert!(cache.get_paste("abc1234").await.unwrap().is_none());
        assert!(cache.invalidate("abc1234").await.is_ok());
        assert!(cache.health_check().await);
    }
}
