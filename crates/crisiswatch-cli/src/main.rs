//! Command line interface for crisiswatch.
//!
//! The write surface (`collect`) is what a cron/scheduler collaborator
//! invokes; the read surface (`recent`) serves the same filtered query the
//! dashboard layer consumes.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crisiswatch_collector::{run_collection, CollectorOptions};
use crisiswatch_core::{AppConfig, FeedSource};
use crisiswatch_db::{prune_older_than, query_recent_filtered, PoolConfig, QueryFilters};

#[derive(Debug, Parser)]
#[command(name = "crisiswatch-cli")]
#[command(about = "Business-distress news collector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one collection cycle and persist new articles
    Collect {
        /// Best-effort minimum number of surviving articles for the cycle
        #[arg(long, default_value_t = 25)]
        min_target: usize,
    },
    /// Show recently collected articles
    Recent {
        /// Trailing window in days
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Filter by crisis category substring (e.g. layoffs)
        #[arg(long)]
        category: Option<String>,
        /// Filter by matched keyword substring
        #[arg(long)]
        keyword: Option<String>,
        /// Keep rows with sentiment at or below this value
        #[arg(long)]
        max_sentiment: Option<f64>,
    },
    /// Delete articles older than the cutoff
    Prune {
        #[arg(long)]
        older_than_hours: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = crisiswatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool =
        crisiswatch_db::connect_pool(&config.database_url, PoolConfig::from_app_config(&config))
            .await?;
    crisiswatch_db::init_schema(&pool).await?;

    match cli.command {
        Commands::Collect { min_target } => run_collect(&pool, &config, min_target).await,
        Commands::Recent {
            days,
            category,
            keyword,
            max_sentiment,
        } => {
            run_recent(
                &pool,
                days,
                QueryFilters {
                    category,
                    keyword,
                    max_sentiment,
                },
            )
            .await
        }
        Commands::Prune { older_than_hours } => run_prune(&pool, older_than_hours).await,
    }
}

fn load_sources(config: &AppConfig) -> anyhow::Result<Vec<FeedSource>> {
    match &config.feeds_path {
        Some(path) => Ok(crisiswatch_core::load_sources(path)?),
        None => Ok(crisiswatch_core::default_sources()),
    }
}

async fn run_collect(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    min_target: usize,
) -> anyhow::Result<()> {
    let sources = load_sources(config)?;
    let options = CollectorOptions::from_app_config(config);

    let outcome = run_collection(pool, &options, &sources, min_target).await?;
    println!(
        "collected {} unique articles, saved {} new",
        outcome.collected, outcome.saved
    );

    if let Some(hours) = config.retention_hours {
        let deleted = prune_older_than(pool, hours).await?;
        if deleted > 0 {
            println!("retention sweep removed {deleted} rows older than {hours}h");
        }
    }

    Ok(())
}

async fn run_recent(
    pool: &sqlx::SqlitePool,
    days: i64,
    filters: QueryFilters,
) -> anyhow::Result<()> {
    let rows = query_recent_filtered(pool, days, &filters).await?;

    if rows.is_empty() {
        println!("no matching articles in the last {days} days; run `collect` first");
        return Ok(());
    }

    println!(
        "{:<12}{:<8}{:<24}{:<26}TITLE",
        "CREATED", "SCORE", "CATEGORY", "SOURCE"
    );
    for row in &rows {
        let created = row.created_at.format("%Y-%m-%d").to_string();
        println!(
            "{:<12}{:<8.2}{:<24.23}{:<26.25}{}",
            created, row.sentiment, row.category, row.source, row.title
        );
    }
    println!("\n{} articles", rows.len());

    Ok(())
}

async fn run_prune(pool: &sqlx::SqlitePool, older_than_hours: u64) -> anyhow::Result<()> {
    let deleted = prune_older_than(pool, older_than_hours).await?;
    println!("removed {deleted} rows older than {older_than_hours}h");
    Ok(())
}
