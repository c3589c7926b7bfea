//! Background removal of expired pastes.
//!
//! Reads already treat expired pastes as gone; this worker reclaims their
//! rows and stored bodies. It never decides expiration on its own: every
//! candidate returned by the repository is re-checked with
//! [`crate::domain::expiration::is_expired`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use tokio::sync::watch;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::entities::Paste;
use crate::domain::expiration::is_expired;
use crate::domain::repositories::PasteRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::storage::PasteStorage;

/// Attempts made to delete one stored body before leaving it orphaned.
const DELETE_ATTEMPTS: usize = 3;

/// Collaborators needed to purge pastes.
#[derive(Clone)]
pub struct PurgeContext {
    pub repository: Arc<dyn PasteRepository>,
    pub storage: Arc<dyn PasteStorage>,
    pub cache: Arc<dyn CacheService>,
}

/// Deletes up to `limit` pastes that are expired at `now`.
///
/// For each paste: delete the row, drop the cache entry, then delete the
/// stored body (retried with backoff). A body that cannot be deleted is
/// logged and left behind; the paste is already unreachable.
///
/// Returns the number of records deleted.
///
/// # Errors
///
/// Returns [`AppError::Internal`] on database errors.
pub async fn purge_expired_batch(
    ctx: &PurgeContext,
    now: NaiveDateTime,
    limit: i64,
) -> Result<usize, AppError> {
    let candidates = ctx.repository.find_expired(now, limit).await?;
    let mut purged = 0;

    for paste in candidates {
        if !is_expired(
            Some(paste.created_at),
            paste.expiration_length_in_minutes,
            now,
        ) {
            debug!(shortlink = %paste.shortlink, "Skipping paste that is not expired yet");
            continue;
        }

        if !ctx.repository.delete(&paste.shortlink).await? {
            continue;
        }
        purged += 1;

        let _ = ctx.cache.invalidate(&paste.shortlink).await;
        delete_content(ctx, &paste).await;
    }

    if purged > 0 {
        info!(purged, "Purged expired pastes");
        metrics::counter!("pastes_purged_total").increment(purged as u64);
    }

    Ok(purged)
}

async fn delete_content(ctx: &PurgeContext, paste: &Paste) {
    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(DELETE_ATTEMPTS - 1);

    let result = Retry::spawn(strategy, || ctx.storage.delete(&paste.paste_path)).await;

    if let Err(e) = result {
        warn!(
            shortlink = %paste.shortlink,
            "Leaving orphaned content {}: {}", paste.paste_path, e
        );
    }
}

/// Runs [`purge_expired_batch`] every `interval` until `shutdown` flips to true.
///
/// Batch failures are logged and retried on the next tick.
pub async fn run_purge_worker(
    ctx: PurgeContext,
    interval: Duration,
    batch_size: i64,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now().naive_utc();
                if let Err(e) = purge_expired_batch(&ctx, now, batch_size).await {
                    error!("Purge sweep failed: {}", e);
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("Purge worker stopped");
                    return;
                }
            }
        }
    }
}
