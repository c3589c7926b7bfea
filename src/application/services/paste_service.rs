//! Paste creation and retrieval service.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::json;
use tracing::{debug, info, warn};

use super::ShortlinkGenerator;
use crate::domain::entities::{NewPaste, Paste, PasteWithContent};
use crate::domain::expiration::seconds_until_expiration;
use crate::domain::repositories::PasteRepository;
use crate::error::{AppError, PasteError};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::storage::PasteStorage;
use crate::utils::shortlink::is_valid_shortlink;

/// Number of inserts attempted when the database rejects a generated
/// shortlink as a duplicate.
pub const MAX_PERSIST_ATTEMPTS: usize = 3;

/// Service for creating and reading pastes.
///
/// Creation writes the body to [`PasteStorage`], generates a shortlink, and
/// inserts the record. A duplicate-key rejection from the repository means a
/// concurrent writer claimed the same shortlink first, so a new one is
/// generated. Reads judge expiration against the caller-supplied `now`.
pub struct PasteService<R: PasteRepository + ?Sized> {
    repository: Arc<R>,
    storage: Arc<dyn PasteStorage>,
    cache: Arc<dyn CacheService>,
    generator: ShortlinkGenerator<R>,
    cache_ttl_seconds: u64,
}

impl<R: PasteRepository + ?Sized> PasteService<R> {
    /// Creates a new paste service.
    pub fn new(
        repository: Arc<R>,
        storage: Arc<dyn PasteStorage>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            generator: ShortlinkGenerator::new(repository.clone()),
            repository,
            storage,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Stores `content` and assigns it a fresh shortlink.
    ///
    /// `now` becomes the paste's `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the content is empty or the
    /// expiration length is negative.
    ///
    /// Returns [`PasteError::GenerationExhausted`] if no free shortlink was
    /// found, or if every insert lost a duplicate-key race.
    ///
    /// Returns [`AppError::Internal`] on storage or database errors.
    pub async fn create_paste(
        &self,
        content: &str,
        expiration_length_in_minutes: Option<i32>,
        now: NaiveDateTime,
    ) -> Result<Paste, AppError> {
        if content.is_empty() {
            return Err(AppError::bad_request(
                "Paste content must not be empty",
                json!({}),
            ));
        }

        if let Some(minutes) = expiration_length_in_minutes
            && minutes < 0
        {
            return Err(AppError::bad_request(
                "Expiration length must not be negative",
                json!({ "expiration_length_in_minutes": minutes }),
            ));
        }

        let paste_path = self.storage.write(content).await?;

        match self
            .persist_with_fresh_shortlink(&paste_path, expiration_length_in_minutes, now)
            .await
        {
            Ok(paste) => {
                info!(shortlink = %paste.shortlink, "Paste created");
                metrics::counter!("pastes_created_total").increment(1);
                Ok(paste)
            }
            Err(e) => {
                self.discard_content(&paste_path).await;
                Err(e)
            }
        }
    }

    async fn persist_with_fresh_shortlink(
        &self,
        paste_path: &str,
        expiration_length_in_minutes: Option<i32>,
        now: NaiveDateTime,
    ) -> Result<Paste, AppError> {
        let mut last_candidate = String::new();

        for attempt in 1..=MAX_PERSIST_ATTEMPTS {
            let shortlink = self.generator.generate_short_link().await?;

            let new_paste = NewPaste {
                shortlink: shortlink.clone(),
                expiration_length_in_minutes,
                created_at: now,
                paste_path: paste_path.to_string(),
            };

            match self.repository.create(new_paste).await {
                Ok(paste) => return Ok(paste),
                Err(e) if e.is_conflict() => {
                    warn!(attempt, shortlink = %shortlink, "Shortlink taken at insert time");
                    metrics::counter!("shortlink_collisions_total").increment(1);
                    last_candidate = shortlink;
                }
                Err(e) => return Err(e),
            }
        }

        Err(PasteError::GenerationExhausted {
            attempts: MAX_PERSIST_ATTEMPTS,
            last_candidate,
        }
        .into())
    }

    async fn discard_content(&self, paste_path: &str) {
        if let Err(e) = self.storage.delete(paste_path).await {
            warn!("Failed to discard content {}: {}", paste_path, e);
        }
    }

    /// Resolves a shortlink to its paste and content.
    ///
    /// Expiration is judged against `now` on every read, cache hits included.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::NotFound`] for malformed or unknown shortlinks.
    /// Returns [`PasteError::Expired`] if the paste exists but `now` is past
    /// its expiration instant.
    /// Returns [`AppError::Internal`] on storage or database errors.
    pub async fn get_paste(
        &self,
        shortlink: &str,
        now: NaiveDateTime,
    ) -> Result<PasteWithContent, AppError> {
        if !is_valid_shortlink(shortlink) {
            return Err(PasteError::not_found(shortlink).into());
        }

        match self.cache.get_paste(shortlink).await {
            Ok(Some(cached)) => {
                metrics::counter!("paste_cache_hits_total").increment(1);

                if cached.paste.is_expired_at(now) {
                    let _ = self.cache.invalidate(shortlink).await;
                    return Err(PasteError::expired(shortlink).into());
                }

                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache error for {}: {}", shortlink, e),
        }

        let paste = self.find_live_paste(shortlink, now).await?;
        let content = self.storage.read(&paste.paste_path).await?;

        let resolved = PasteWithContent { paste, content };
        self.populate_cache(&resolved, now).await;

        Ok(resolved)
    }

    /// Loads a paste record without its content.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_paste`], minus storage errors.
    pub async fn find_live_paste(
        &self,
        shortlink: &str,
        now: NaiveDateTime,
    ) -> Result<Paste, AppError> {
        let paste = self
            .repository
            .find_by_shortlink(shortlink)
            .await?
            .ok_or_else(|| PasteError::not_found(shortlink))?;

        if paste.is_expired_at(now) {
            debug!(shortlink, "Paste is expired");
            return Err(PasteError::expired(shortlink).into());
        }

        Ok(paste)
    }

    /// Caches a resolved paste, never past its expiration instant.
    async fn populate_cache(&self, resolved: &PasteWithContent, now: NaiveDateTime) {
        let paste = &resolved.paste;
        let remaining =
            seconds_until_expiration(Some(paste.created_at), paste.expiration_length_in_minutes, now);

        let ttl = match remaining {
            Some(0) => return,
            Some(seconds) => seconds.min(self.cache_ttl_seconds),
            None => self.cache_ttl_seconds,
        };

        if let Err(e) = self.cache.set_paste(resolved, Some(ttl)).await {
            warn!("Failed to cache paste {}: {}", paste.shortlink, e);
        }
    }

    /// Checks that the repository is reachable.
    pub async fn check_repository(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
