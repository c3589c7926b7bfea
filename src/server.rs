//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, storage and cache setup, the purge worker,
//! and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::purge_worker::{PurgeContext, run_purge_worker};
use crate::domain::repositories::PasteRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::PgPasteRepository;
use crate::infrastructure::storage::{FsPasteStorage, PasteStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Builds the PostgreSQL pool from configuration.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Connects to Redis if configured, falling back to [`NullCache`].
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Paste storage directory
/// - Redis cache (or NullCache fallback)
/// - Background purge worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Storage directory cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let storage: Arc<dyn PasteStorage> = Arc::new(
        FsPasteStorage::new(&config.paste_storage_dir)
            .await
            .context("Failed to open paste storage")?,
    );

    let cache = connect_cache(&config).await;

    let repository: Arc<dyn PasteRepository> = Arc::new(PgPasteRepository::new(Arc::new(pool)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let purge_handle = if config.is_purge_enabled() {
        let ctx = PurgeContext {
            repository: repository.clone(),
            storage: storage.clone(),
            cache: cache.clone(),
        };
        let handle = tokio::spawn(run_purge_worker(
            ctx,
            Duration::from_secs(config.purge_interval_seconds),
            config.purge_batch_size,
            shutdown_rx.clone(),
        ));
        tracing::info!("Purge worker started");
        Some(handle)
    } else {
        tracing::info!("Purge worker disabled");
        None
    };

    let state = AppState::new(
        repository,
        storage,
        cache,
        config.base_url.clone(),
        config.max_paste_bytes,
        config.cache_ttl_seconds,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let mut server_rx = shutdown_rx.clone();
    tokio::spawn(wait_for_signal(shutdown_tx));

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(async move {
        let _ = server_rx.wait_for(|&stop| stop).await;
    })
    .await?;

    if let Some(handle) = purge_handle {
        let _ = handle.await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Flips `shutdown` to true on Ctrl-C or SIGTERM.
async fn wait_for_signal(shutdown: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown.send(true);
}
