//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::PasteService;
use crate::domain::repositories::PasteRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::storage::PasteStorage;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub paste_service: Arc<PasteService<dyn PasteRepository>>,
    pub storage: Arc<dyn PasteStorage>,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix for paste URLs, without a trailing slash.
    pub base_url: String,
    /// Maximum accepted paste size in bytes.
    pub max_paste_bytes: usize,
}

impl AppState {
    /// Wires the paste service over the given collaborators.
    pub fn new(
        repository: Arc<dyn PasteRepository>,
        storage: Arc<dyn PasteStorage>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
        max_paste_bytes: usize,
        cache_ttl_seconds: u64,
    ) -> Self {
        let paste_service = Arc::new(PasteService::new(
            repository,
            storage.clone(),
            cache.clone(),
            cache_ttl_seconds,
        ));

        Self {
            paste_service,
            storage,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_paste_bytes,
        }
    }

    /// Public URL of a paste.
    pub fn paste_url(&self, shortlink: &str) -> String {
        format!("{}/{}", self.base_url, shortlink)
    }
}
