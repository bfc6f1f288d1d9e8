//! Source fetch fan-out.
//!
//! Every source is fetched independently: a failure, timeout, or malformed
//! response for one source is logged and contributes zero candidates for the
//! cycle, never aborting the others. Each fetch carries a per-source
//! deadline, and the whole fan-out carries an overall deadline.

mod feed;
mod hackernews;
mod newsapi;
mod reddit;

use futures::stream::{self, StreamExt};
use tokio::time::timeout;

use crisiswatch_core::{FeedSource, SourceKind};

use crate::error::CollectorError;
use crate::types::{CandidateArticle, CollectorOptions};

/// Fetch candidates from every source.
///
/// Pooled mode (`max_concurrent_sources > 1`) bounds in-flight fetches with
/// a worker pool and abandons the slow tail at the overall deadline, keeping
/// whatever completed. Sequential mode inserts a politeness delay between
/// requests instead.
pub(crate) async fn collect_candidates(
    client: &reqwest::Client,
    options: &CollectorOptions,
    sources: &[FeedSource],
) -> Vec<CandidateArticle> {
    if sources.is_empty() {
        return Vec::new();
    }

    if options.max_concurrent_sources <= 1 {
        collect_sequential(client, options, sources).await
    } else {
        collect_pooled(client, options, sources).await
    }
}

async fn collect_pooled(
    client: &reqwest::Client,
    options: &CollectorOptions,
    sources: &[FeedSource],
) -> Vec<CandidateArticle> {
    let batches: Vec<Vec<CandidateArticle>> = stream::iter(sources)
        .map(|source| fetch_one(client, options, source))
        .buffer_unordered(options.max_concurrent_sources)
        .take_until(tokio::time::sleep(options.overall_timeout))
        .collect()
        .await;

    if batches.len() < sources.len() {
        tracing::warn!(
            fetched = batches.len(),
            total = sources.len(),
            "overall fetch deadline reached — abandoning slow sources"
        );
    }

    batches.into_iter().flatten().collect()
}

async fn collect_sequential(
    client: &reqwest::Client,
    options: &CollectorOptions,
    sources: &[FeedSource],
) -> Vec<CandidateArticle> {
    let started = tokio::time::Instant::now();
    let mut candidates = Vec::new();

    for (i, source) in sources.iter().enumerate() {
        if started.elapsed() >= options.overall_timeout {
            tracing::warn!(
                remaining = sources.len() - i,
                "overall fetch deadline reached — skipping remaining sources"
            );
            break;
        }
        if i > 0 && !options.inter_request_delay.is_zero() {
            tokio::time::sleep(options.inter_request_delay).await;
        }
        candidates.extend(fetch_one(client, options, source).await);
    }

    candidates
}

/// Fetch one source under its deadline, converting every failure mode into
/// an empty batch.
async fn fetch_one(
    client: &reqwest::Client,
    options: &CollectorOptions,
    source: &FeedSource,
) -> Vec<CandidateArticle> {
    let fetch = dispatch(client, options, source);
    match timeout(options.per_source_timeout, fetch).await {
        Ok(Ok(candidates)) => {
            tracing::debug!(url = %source.url, count = candidates.len(), "collected candidates");
            candidates
        }
        Ok(Err(e)) => {
            tracing::warn!(url = %source.url, kind = ?source.kind, error = %e, "source fetch failed");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(
                url = %source.url,
                timeout_secs = options.per_source_timeout.as_secs(),
                "source fetch timed out"
            );
            Vec::new()
        }
    }
}

async fn dispatch(
    client: &reqwest::Client,
    options: &CollectorOptions,
    source: &FeedSource,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    let limit = options.per_source_limit;
    match source.kind {
        SourceKind::Feed => feed::fetch_feed(client, &source.url, limit).await,
        SourceKind::NewsApi => match options.newsapi_key.as_deref() {
            Some(key) => Ok(newsapi::fetch_newsapi(client, &source.url, key, limit).await),
            None => {
                tracing::debug!(url = %source.url, "no NewsAPI credential configured — skipping source");
                Ok(Vec::new())
            }
        },
        SourceKind::HackerNews => hackernews::fetch_hackernews(client, &source.url, limit).await,
        SourceKind::Reddit => reddit::fetch_reddit(client, &source.url, limit).await,
    }
}
