//! Database operations for the `articles` table.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub description: String,
    /// Publication timestamp as reported by the source; `None` when the
    /// source supplied nothing parseable.
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    pub sentiment: f64,
    /// Comma-joined matched crisis keywords.
    pub keywords: String,
    /// Comma-joined crisis categories, or `general`.
    pub category: String,
    /// Insertion timestamp, assigned by the store. Immutable.
    pub created_at: DateTime<Utc>,
}

/// An article accepted by the pipeline, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    pub sentiment: f64,
    pub keywords: String,
    pub category: String,
}

/// Optional filters for the dashboard-facing recency query.
#[derive(Debug, Clone, Default)]
pub struct QueryFilters {
    /// Substring match against the comma-joined category list.
    pub category: Option<String>,
    /// Substring match against the comma-joined keyword list.
    pub keyword: Option<String>,
    /// Keep rows with sentiment at or below this value.
    pub max_sentiment: Option<f64>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a batch of articles, silently skipping any whose `link` already
/// exists. Returns the number of rows actually inserted.
///
/// Uniqueness is enforced by the store's `UNIQUE` constraint via
/// `ON CONFLICT(link) DO NOTHING` — first write wins, later fetches of the
/// same URL are discarded even if their scoring differs. All rows in the
/// batch share one `created_at` insertion timestamp.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction or any insert fails.
pub async fn insert_articles(pool: &SqlitePool, records: &[NewArticle]) -> Result<u64, DbError> {
    if records.is_empty() {
        return Ok(0);
    }

    let created_at = Utc::now();
    let mut tx = pool.begin().await?;
    let mut saved: u64 = 0;

    for record in records {
        let result = sqlx::query(
            "INSERT INTO articles \
               (title, link, description, published, source, sentiment, keywords, category, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             ON CONFLICT(link) DO NOTHING",
        )
        .bind(&record.title)
        .bind(&record.link)
        .bind(&record.description)
        .bind(record.published)
        .bind(&record.source)
        .bind(record.sentiment)
        .bind(&record.keywords)
        .bind(&record.category)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        saved += result.rows_affected();
    }

    tx.commit().await?;
    Ok(saved)
}

/// Delete rows whose `created_at` is older than `hours` ago. Returns the
/// number of rows deleted.
///
/// Housekeeping only — disabled-by-default policy, never correctness-critical.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn prune_older_than(pool: &SqlitePool, hours: u64) -> Result<u64, DbError> {
    let cutoff = Utc::now() - Duration::hours(i64::try_from(hours).unwrap_or(i64::MAX));
    let result = sqlx::query("DELETE FROM articles WHERE created_at < ?1")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Return all rows inserted within the trailing `days * 24h` window,
/// newest first by `created_at`, tie-broken by `published` descending.
///
/// Rows with no parseable `published` value sort after any dated row at the
/// same `created_at` (SQLite places NULLs last under `DESC`).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn query_recent(pool: &SqlitePool, days: i64) -> Result<Vec<ArticleRow>, DbError> {
    query_recent_filtered(pool, days, &QueryFilters::default()).await
}

/// [`query_recent`] with optional dashboard filters applied server-side.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn query_recent_filtered(
    pool: &SqlitePool,
    days: i64,
    filters: &QueryFilters,
) -> Result<Vec<ArticleRow>, DbError> {
    let cutoff = Utc::now() - Duration::days(days);

    let rows = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, title, link, description, published, source, \
                sentiment, keywords, category, created_at \
         FROM articles \
         WHERE created_at >= ?1 \
           AND (?2 IS NULL OR instr(category, ?2) > 0) \
           AND (?3 IS NULL OR instr(keywords, ?3) > 0) \
           AND (?4 IS NULL OR sentiment <= ?4) \
         ORDER BY created_at DESC, published DESC",
    )
    .bind(cutoff)
    .bind(filters.category.as_deref())
    .bind(filters.keyword.as_deref())
    .bind(filters.max_sentiment)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
