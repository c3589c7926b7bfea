//! CLI administration tool for bitroute.
//!
//! Inspects pastes, purges expired ones, and runs database diagnostics
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a paste record
//! cargo run --bin admin -- paste show aB3dE5g
//!
//! # Remove expired pastes now
//! cargo run --bin admin -- paste purge-expired -y
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`bitroute::config`]. `DATABASE_URL` (or the
//! `DB_*` components) is required, `PASTE_STORAGE_DIR` locates paste bodies.

use bitroute::config::{self, Config};
use bitroute::domain::expiration::{expiration_time, is_expired};
use bitroute::domain::purge_worker::{PurgeContext, purge_expired_batch};
use bitroute::domain::repositories::PasteRepository;
use bitroute::infrastructure::persistence::PgPasteRepository;
use bitroute::infrastructure::storage::FsPasteStorage;
use bitroute::server::{connect_cache, connect_pool};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bitroute.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and maintain pastes
    Paste {
        #[command(subcommand)]
        action: PasteAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Paste subcommands.
#[derive(Subcommand)]
enum PasteAction {
    /// Show a paste record and its expiration state
    Show {
        /// 7-character shortlink
        shortlink: String,
    },

    /// Delete every paste that has expired
    PurgeExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Paste { action } => handle_paste_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches paste commands.
async fn handle_paste_action(action: PasteAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgPasteRepository::new(Arc::new(pool.clone())));

    match action {
        PasteAction::Show { shortlink } => show_paste(repo, &shortlink).await?,
        PasteAction::PurgeExpired { yes } => purge_expired(repo, config, yes).await?,
    }

    Ok(())
}

/// Prints one paste record.
async fn show_paste(repo: Arc<PgPasteRepository>, shortlink: &str) -> Result<()> {
    println!("{}", "📄 Paste".bright_blue().bold());
    println!();

    let paste = repo
        .find_by_shortlink(shortlink)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Paste not found with shortlink: {}", shortlink))?;

    let now = Utc::now().naive_utc();
    let expires_at = expiration_time(Some(paste.created_at), paste.expiration_length_in_minutes);

    let state = if is_expired(Some(paste.created_at), paste.expiration_length_in_minutes, now) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Shortlink:  {}", paste.shortlink.cyan());
    println!(
        "  Created:    {}",
        paste.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    match paste.expiration_length_in_minutes {
        Some(minutes) => println!("  Lifetime:   {} min", minutes),
        None => println!("  Lifetime:   {}", "none".bright_black()),
    }
    match expires_at {
        Some(at) => println!("  Expires:    {}", at.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Expires:    {}", "never".bright_black()),
    }
    println!("  Content:    {}", paste.paste_path.bright_black());
    println!("  State:      {}", state);
    println!();

    Ok(())
}

/// Purges expired pastes in batches until none remain.
async fn purge_expired(
    repo: Arc<PgPasteRepository>,
    config: &Config,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🧹 Purge Expired Pastes".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all expired pastes and their content?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let storage = FsPasteStorage::new(&config.paste_storage_dir)
        .await
        .context("Failed to open paste storage")?;

    let ctx = PurgeContext {
        repository: repo,
        storage: Arc::new(storage),
        cache: connect_cache(config).await,
    };

    let now = Utc::now().naive_utc();
    let mut total = 0;

    loop {
        let purged = purge_expired_batch(&ctx, now, config.purge_batch_size)
            .await
            .map_err(|e| anyhow::anyhow!("Purge failed: {}", e))?;
        total += purged;

        if (purged as i64) < config.purge_batch_size {
            break;
        }
    }

    println!(
        "{} {}",
        "✅ Purged pastes:".green().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays paste statistics.
///
/// Shows:
/// - Total number of pastes
/// - Number of pastes past their expiration
/// - Number of pastes that never expire
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgPasteRepository::new(Arc::new(pool.clone()));
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let expired: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pastes \
         WHERE expiration_length_in_minutes IS NOT NULL \
           AND created_at + make_interval(mins => expiration_length_in_minutes) < $1",
    )
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;

    let permanent: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pastes WHERE expiration_length_in_minutes IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Pastes:         {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Expired:        {}",
        expired.to_string().bright_yellow().bold()
    );
    println!(
        "  Never expiring: {}",
        permanent.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
