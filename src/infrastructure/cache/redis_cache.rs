//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::PasteWithContent;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache implementation for resolved pastes.
///
/// Entries are JSON-encoded [`PasteWithContent`] values under `paste:<shortlink>`.
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set_paste`]
    ///   is called with `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS` env var
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "paste:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, shortlink: &str) -> String {
        format!("{}{}", self.key_prefix, shortlink)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_paste(&self, shortlink: &str) -> CacheResult<Option<PasteWithContent>> {
        let key = self.build_key(shortlink);
        let mut conn = self.client.clone();

        let raw = match conn.get::<_, Option<String>>(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Redis GET error for {}: {}", shortlink, e);
                return Ok(None);
            }
        };

        let Some(raw) = raw else {
            debug!("Cache MISS: {}", shortlink);
            return Ok(None);
        };

        match serde_json::from_str::<PasteWithContent>(&raw) {
            Ok(paste) => {
                debug!("Cache HIT: {}", shortlink);
                Ok(Some(paste))
            }
            Err(e) => {
                warn!("Discarding undecodable cache entry for {}: {}", shortlink, e);
                Ok(None)
            }
        }
    }

    async fn set_paste(
        &self,
        paste: &PasteWithContent,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let shortlink = &paste.paste.shortlink;
        let key = self.build_key(shortlink);
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl);

        let payload = serde_json::to_string(paste)
            .map_err(|e| CacheError::OperationError(format!("Failed to encode paste: {}", e)))?;

        let mut conn = self.client.clone();
        match conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", shortlink, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", shortlink, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, shortlink: &str) -> CacheResult<()> {
        let key = self.build_key(shortlink);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", shortlink);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", shortlink, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
