//! Bounded-retry shortlink generation against the uniqueness oracle.

use std::sync::Arc;

use crate::domain::repositories::PasteRepository;
use crate::error::{AppError, PasteError};
use crate::utils::shortlink::{MAX_RETRIES, random_candidate};
use tracing::{debug, warn};

/// Generates shortlinks that are not yet taken, as far as the repository knows.
///
/// The check is probabilistic: a concurrent writer may claim the same
/// candidate between the check and the insert. The repository's
/// [`PasteRepository::create`] is the authoritative guard and callers retry
/// on its conflict error (see [`super::PasteService::create_paste`]).
pub struct ShortlinkGenerator<R: PasteRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: PasteRepository + ?Sized> ShortlinkGenerator<R> {
    /// Creates a generator consulting `repository` as the uniqueness oracle.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns a 7-character base62 shortlink not present in the repository.
    ///
    /// Tries at most [`MAX_RETRIES`] candidates and returns the first one
    /// the oracle reports as free.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::GenerationExhausted`] if every candidate
    /// collided. Callers surface this as "temporarily unavailable" and must
    /// not retry it in a tight loop.
    ///
    /// Returns [`AppError::Internal`] if the oracle itself fails; such
    /// failures are not counted as collisions.
    pub async fn generate_short_link(&self) -> Result<String, AppError> {
        let mut last_candidate = String::new();

        for attempt in 1..=MAX_RETRIES {
            let candidate = random_candidate();

            if !self.repository.exists_by_shortlink(&candidate).await? {
                return Ok(candidate);
            }

            debug!(attempt, candidate = %candidate, "Shortlink collision");
            metrics::counter!("shortlink_collisions_total").increment(1);
            last_candidate = candidate;
        }

        warn!(
            attempts = MAX_RETRIES,
            "Exhausted shortlink generation attempts"
        );
        metrics::counter!("shortlink_generation_exhausted_total").increment(1);

        Err(PasteError::GenerationExhausted {
            attempts: MAX_RETRIES,
            last_candidate,
        }
        .into())
    }
}
