//! NewsAPI article-search collector.
//!
//! Requires a credential; the dispatch layer skips this source entirely when
//! none is configured. One request is made per crisis query; a failing query
//! is logged and skipped so the remaining queries still contribute.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::feed::parse_published;
use crate::error::CollectorError;
use crate::text::{strip_html, truncate_chars};
use crate::types::CandidateArticle;

/// Search queries targeting business-distress coverage.
const CRISIS_QUERIES: &[&str] = &[
    "business bankruptcy OR company closure OR layoffs",
    "business shutdown OR company liquidation",
    "corporate layoffs OR restructuring OR financial troubles",
];

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<NewsApiSource>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Fetch candidates from the NewsAPI `everything` endpoint.
///
/// Per-query failures are logged and skipped; the function returns whatever
/// the surviving queries produced.
pub(crate) async fn fetch_newsapi(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    limit: usize,
) -> Vec<CandidateArticle> {
    let mut candidates = Vec::new();

    for query in CRISIS_QUERIES {
        match fetch_query(client, endpoint, api_key, query, limit).await {
            Ok(mut batch) => {
                tracing::debug!(query, count = batch.len(), "collected NewsAPI articles");
                candidates.append(&mut batch);
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "NewsAPI query failed");
            }
        }
    }

    candidates
}

async fn fetch_query(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    query: &str,
    limit: usize,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
    let url = format!(
        "{endpoint}?q={encoded}&language=en&sortBy=publishedAt&pageSize={limit}&apiKey={api_key}"
    );

    // reqwest errors carry the request URL; strip it so the credential never
    // reaches the logs.
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| CollectorError::Http(e.without_url()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            // Never echo the credential into logs.
            url: endpoint.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| CollectorError::Http(e.without_url()))?;
    let parsed: NewsApiResponse =
        serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
            context: format!("NewsAPI response for \"{query}\""),
            source: e,
        })?;

    Ok(map_articles(parsed))
}

fn map_articles(response: NewsApiResponse) -> Vec<CandidateArticle> {
    response
        .articles
        .into_iter()
        .filter_map(|article| {
            let link = article.url.unwrap_or_default();
            if link.is_empty() {
                return None;
            }
            Some(CandidateArticle {
                title: article.title.unwrap_or_default(),
                link,
                description: truncate_chars(
                    &strip_html(&article.description.unwrap_or_default()),
                    300,
                ),
                published: article
                    .published_at
                    .as_deref()
                    .and_then(parse_published),
                source: article
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "NewsAPI".to_string()),
            })
        })
        .collect()
}
