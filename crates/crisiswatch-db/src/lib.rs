//! SQLite persistence for crisiswatch.
//!
//! One table, one row per unique article URL. The uniqueness constraint on
//! `link` is the safety net against duplicate rows under concurrent writers;
//! callers never pre-check for existence.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use thiserror::Error;

use crisiswatch_core::AppConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database URL \"{url}\": {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect to a SQLite pool using an explicit URL and pool config.
///
/// The database file is created if missing; WAL journaling and a busy
/// timeout keep concurrent external writers from erroring on lock contention.
///
/// # Errors
///
/// Returns [`DbError::InvalidDatabaseUrl`] if the URL does not parse, or
/// [`DbError::Sqlx`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DbError> {
    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbError::InvalidDatabaseUrl {
            url: database_url.to_string(),
            reason: e.to_string(),
        })?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(connect_options)
        .await?;

    Ok(pool)
}

/// Create the `articles` table and its indexes if they do not exist.
///
/// Idempotent: safe to run on every startup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the DDL fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS articles (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             title TEXT NOT NULL,
             link TEXT NOT NULL UNIQUE,
             description TEXT NOT NULL,
             published TEXT,
             source TEXT NOT NULL,
             sentiment REAL NOT NULL,
             keywords TEXT NOT NULL,
             category TEXT NOT NULL,
             created_at TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at);
         CREATE INDEX IF NOT EXISTS idx_articles_category ON articles (category);",
    )
    .execute(pool)
    .await?;

    Ok(())
}


pub mod articles;

pub use articles::{
    insert_articles, prune_older_than, query_recent, query_recent_filtered, ArticleRow,
    NewArticle, QueryFilters,
};
