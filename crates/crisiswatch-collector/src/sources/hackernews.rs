//! Hacker News collector (Firebase API, credential-free).

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;

use crate::error::CollectorError;
use crate::types::CandidateArticle;

/// Concurrent per-item fetches; the item endpoint is cheap but numerous.
const ITEM_FETCH_CONCURRENCY: usize = 4;

#[derive(Debug, Deserialize)]
struct HnItem {
    id: u64,
    title: Option<String>,
    url: Option<String>,
    time: Option<i64>,
}

/// Fetch the current top stories and return up to `limit` candidates.
///
/// Per-item fetch failures are logged at debug and skipped; only the
/// top-stories listing itself is a hard error for this source.
///
/// # Errors
///
/// Returns [`CollectorError`] if the top-stories listing cannot be fetched
/// or parsed.
pub(crate) async fn fetch_hackernews(
    client: &reqwest::Client,
    base_url: &str,
    limit: usize,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    let listing_url = format!("{base_url}/topstories.json");
    let response = client.get(&listing_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            url: listing_url,
        });
    }
    let body = response.text().await?;
    let ids: Vec<u64> = serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
        context: "Hacker News top stories".to_string(),
        source: e,
    })?;

    let items: Vec<Option<HnItem>> = stream::iter(ids.into_iter().take(limit))
        .map(|id| fetch_item(client, base_url, id))
        .buffer_unordered(ITEM_FETCH_CONCURRENCY)
        .collect()
        .await;

    Ok(items
        .into_iter()
        .flatten()
        .map(candidate_from_item)
        .collect())
}

async fn fetch_item(client: &reqwest::Client, base_url: &str, id: u64) -> Option<HnItem> {
    let url = format!("{base_url}/item/{id}.json");
    let result: Result<HnItem, CollectorError> = async {
        let body = client.get(&url).send().await?.text().await?;
        serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
            context: format!("Hacker News item {id}"),
            source: e,
        })
    }
    .await;

    match result {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::debug!(id, error = %e, "Hacker News item fetch failed");
            None
        }
    }
}

fn candidate_from_item(item: HnItem) -> CandidateArticle {
    let title = item.title.unwrap_or_default();
    let link = item
        .url
        .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", item.id));
    CandidateArticle {
        description: format!("Hacker News discussion: {title}"),
        title,
        link,
        published: item
            .time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        source: "Hacker News".to_string(),
    }
}
