//! Store behavior tests against in-memory SQLite.
//!
//! A single-connection pool is required: every new `sqlite::memory:`
//! connection opens a fresh, empty database.

use chrono::{DateTime, Duration, Utc};

use crisiswatch_db::{
    connect_pool, init_schema, insert_articles, prune_older_than, query_recent,
    query_recent_filtered, NewArticle, PoolConfig, QueryFilters,
};

async fn memory_pool() -> sqlx::SqlitePool {
    let pool = connect_pool(
        "sqlite::memory:",
        PoolConfig {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
        },
    )
    .await
    .expect("failed to open in-memory database");
    init_schema(&pool).await.expect("failed to create schema");
    pool
}

fn article(link: &str, title: &str) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        link: link.to_string(),
        description: "Example Corp files for chapter 11".to_string(),
        published: Some(Utc::now()),
        source: "Test Wire".to_string(),
        sentiment: -0.5,
        keywords: "bankruptcy,chapter 11".to_string(),
        category: "bankruptcy".to_string(),
    }
}

async fn set_created_at(pool: &sqlx::SqlitePool, link: &str, created_at: DateTime<Utc>) {
    sqlx::query("UPDATE articles SET created_at = ?1 WHERE link = ?2")
        .bind(created_at)
        .bind(link)
        .execute(pool)
        .await
        .expect("failed to backdate row");
}

#[tokio::test]
async fn init_schema_is_idempotent() {
    let pool = memory_pool().await;
    init_schema(&pool).await.expect("second init should be a no-op");
}

#[tokio::test]
async fn insert_counts_only_new_rows() {
    let pool = memory_pool().await;
    let batch = vec![article("https://x/1", "one"), article("https://x/2", "two")];

    let saved = insert_articles(&pool, &batch).await.unwrap();
    assert_eq!(saved, 2, "both rows are new");

    let saved_again = insert_articles(&pool, &batch).await.unwrap();
    assert_eq!(saved_again, 0, "re-inserting the same links saves nothing");

    let rows = query_recent(&pool, 1).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn duplicate_link_keeps_first_write() {
    let pool = memory_pool().await;

    insert_articles(&pool, &[article("https://x/1", "original title")])
        .await
        .unwrap();
    let saved = insert_articles(&pool, &[article("https://x/1", "replacement title")])
        .await
        .unwrap();
    assert_eq!(saved, 0);

    let rows = query_recent(&pool, 1).await.unwrap();
    assert_eq!(rows.len(), 1, "exactly one row per unique link");
    assert_eq!(rows[0].title, "original title", "first write wins");
}

#[tokio::test]
async fn mixed_batch_counts_only_the_new_link() {
    let pool = memory_pool().await;

    insert_articles(&pool, &[article("https://x/1", "one")])
        .await
        .unwrap();
    let saved = insert_articles(
        &pool,
        &[article("https://x/1", "one again"), article("https://x/2", "two")],
    )
    .await
    .unwrap();
    assert_eq!(saved, 1, "only the unseen link counts toward saved");
}

#[tokio::test]
async fn query_recent_respects_trailing_window() {
    let pool = memory_pool().await;
    let now = Utc::now();

    insert_articles(
        &pool,
        &[
            article("https://x/fresh", "fresh"),
            article("https://x/week-old", "week old"),
            article("https://x/ancient", "ancient"),
        ],
    )
    .await
    .unwrap();
    set_created_at(&pool, "https://x/fresh", now - Duration::hours(1)).await;
    set_created_at(&pool, "https://x/week-old", now - Duration::days(10)).await;
    set_created_at(&pool, "https://x/ancient", now - Duration::days(40)).await;

    let last_week = query_recent(&pool, 7).await.unwrap();
    assert_eq!(last_week.len(), 1);
    assert_eq!(last_week[0].link, "https://x/fresh");

    let last_month = query_recent(&pool, 30).await.unwrap();
    let links: Vec<&str> = last_month.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(
        links,
        vec!["https://x/fresh", "https://x/week-old"],
        "newest first, 40-day-old row excluded"
    );
}

#[tokio::test]
async fn published_breaks_ties_and_null_sorts_last() {
    let pool = memory_pool().await;
    let now = Utc::now();

    let mut dated = article("https://x/dated", "dated");
    dated.published = Some(now);
    let mut older = article("https://x/older", "older");
    older.published = Some(now - Duration::hours(6));
    let mut undated = article("https://x/undated", "undated");
    undated.published = None;

    // One batch: all three share the same created_at.
    insert_articles(&pool, &[undated, older, dated]).await.unwrap();

    let rows = query_recent(&pool, 1).await.unwrap();
    let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(
        links,
        vec!["https://x/dated", "https://x/older", "https://x/undated"],
        "published DESC within equal created_at, NULL last"
    );
}

#[tokio::test]
async fn filters_narrow_the_recency_query() {
    let pool = memory_pool().await;

    let mut layoffs = article("https://x/layoffs", "layoffs");
    layoffs.keywords = "layoffs,job cuts".to_string();
    layoffs.category = "layoffs".to_string();
    layoffs.sentiment = -0.8;

    let mut lawsuit = article("https://x/lawsuit", "lawsuit");
    lawsuit.keywords = "lawsuit".to_string();
    lawsuit.category = "legal_troubles".to_string();
    lawsuit.sentiment = 0.1;

    insert_articles(&pool, &[layoffs, lawsuit]).await.unwrap();

    let by_category = query_recent_filtered(
        &pool,
        1,
        &QueryFilters {
            category: Some("layoffs".to_string()),
            ..QueryFilters::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].link, "https://x/layoffs");

    let by_keyword = query_recent_filtered(
        &pool,
        1,
        &QueryFilters {
            keyword: Some("lawsuit".to_string()),
            ..QueryFilters::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_keyword.len(), 1);
    assert_eq!(by_keyword[0].link, "https://x/lawsuit");

    let by_sentiment = query_recent_filtered(
        &pool,
        1,
        &QueryFilters {
            max_sentiment: Some(-0.5),
            ..QueryFilters::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_sentiment.len(), 1);
    assert_eq!(by_sentiment[0].link, "https://x/layoffs");
}

#[tokio::test]
async fn prune_removes_only_expired_rows() {
    let pool = memory_pool().await;
    let now = Utc::now();

    insert_articles(
        &pool,
        &[article("https://x/new", "new"), article("https://x/old", "old")],
    )
    .await
    .unwrap();
    set_created_at(&pool, "https://x/old", now - Duration::hours(100)).await;

    let deleted = prune_older_than(&pool, 48).await.unwrap();
    assert_eq!(deleted, 1);

    let rows = query_recent(&pool, 30).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link, "https://x/new");
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
    let pool = memory_pool().await;
    let saved = insert_articles(&pool, &[]).await.unwrap();
    assert_eq!(saved, 0);
}
