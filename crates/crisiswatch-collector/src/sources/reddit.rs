//! Reddit business-discussion collector.
//!
//! Uses the public listing JSON endpoints; no OAuth. Reddit rejects requests
//! without a descriptive `User-Agent`, which the shared client already sets.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::CollectorError;
use crate::text::truncate_chars;
use crate::types::CandidateArticle;

#[derive(Debug, Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    title: Option<String>,
    permalink: Option<String>,
    #[serde(default)]
    selftext: String,
    created_utc: Option<f64>,
}

/// Fetch a subreddit listing and return up to `limit` candidates.
///
/// # Errors
///
/// Returns [`CollectorError`] on network failure, non-2xx status, or a
/// payload that is not a Reddit listing.
pub(crate) async fn fetch_reddit(
    client: &reqwest::Client,
    url: &str,
    limit: usize,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    let listing: RedditListing =
        serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
            context: format!("Reddit listing from {url}"),
            source: e,
        })?;

    Ok(map_posts(listing, limit))
}

#[allow(clippy::cast_possible_truncation)] // created_utc is whole seconds
fn map_posts(listing: RedditListing, limit: usize) -> Vec<CandidateArticle> {
    listing
        .data
        .children
        .into_iter()
        .take(limit)
        .filter_map(|child| {
            let post = child.data;
            let permalink = post.permalink.unwrap_or_default();
            if permalink.is_empty() {
                return None;
            }
            Some(CandidateArticle {
                title: post.title.unwrap_or_default(),
                link: format!("https://reddit.com{permalink}"),
                description: truncate_chars(&post.selftext, 300),
                published: post
                    .created_utc
                    .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0)),
                source: "Reddit Business".to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LISTING: &str = r#"{
        "data": {
            "children": [
                {"data": {"title": "Local chain closing all stores",
                          "permalink": "/r/business/comments/abc/chain/",
                          "selftext": "They announced liquidation today.",
                          "created_utc": 1754200000.0}},
                {"data": {"title": "No permalink", "permalink": null,
                          "selftext": "", "created_utc": null}}
            ]
        }
    }"#;

    #[test]
    fn maps_posts_and_drops_missing_permalinks() {
        let listing: RedditListing = serde_json::from_str(SAMPLE_LISTING).unwrap();
        let candidates = map_posts(listing, 20);
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].link,
            "https://reddit.com/r/business/comments/abc/chain/"
        );
        assert_eq!(candidates[0].source, "Reddit Business");
        assert!(candidates[0].published.is_some());
    }

    #[test]
    fn limit_caps_posts() {
        let listing: RedditListing = serde_json::from_str(SAMPLE_LISTING).unwrap();
        let candidates = map_posts(listing, 0);
        assert!(candidates.is_empty());
    }
}
