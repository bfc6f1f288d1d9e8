//! Feed-source catalog: the static configuration of where articles come from.
//!
//! Sources are passed explicitly into the collection pipeline so tests can
//! inject fakes; nothing here is global mutable state. A deployment can
//! replace the built-in catalog with a YAML file via `CRISISWATCH_FEEDS_PATH`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How a source is fetched and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// RSS/Atom syndication feed.
    Feed,
    /// Authenticated NewsAPI article search; skipped without a credential.
    NewsApi,
    /// Hacker News Firebase API (top stories).
    HackerNews,
    /// Public subreddit listing JSON.
    Reddit,
}

/// Which collection round a source belongs to.
///
/// `Priority` sources are fetched every cycle; `Secondary` sources are only
/// pulled in by the retry-for-volume rounds when the priority pass comes up
/// short of the target count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    #[default]
    Priority,
    Secondary,
}

/// One externally-owned endpoint the fetcher polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    #[serde(default = "default_kind")]
    pub kind: SourceKind,
    #[serde(default)]
    pub tier: SourceTier,
}

fn default_kind() -> SourceKind {
    SourceKind::Feed
}

impl FeedSource {
    #[must_use]
    pub fn feed(url: &str, tier: SourceTier) -> Self {
        Self {
            url: url.to_string(),
            kind: SourceKind::Feed,
            tier,
        }
    }
}

/// The built-in source catalog.
///
/// Priority tier: major business-news feeds, industry trade feeds, the
/// NewsAPI search endpoint, and Hacker News. Secondary tier: broader outlets
/// and regional business journals, used only when a cycle misses its volume
/// target.
#[must_use]
pub fn default_sources() -> Vec<FeedSource> {
    use SourceTier::{Priority, Secondary};

    vec![
        FeedSource::feed("https://feeds.reuters.com/reuters/businessNews", Priority),
        FeedSource::feed("https://rss.cnn.com/rss/money_news_companies.rss", Priority),
        FeedSource::feed("https://feeds.bloomberg.com/markets/news.rss", Priority),
        FeedSource::feed(
            "https://www.cnbc.com/id/10000664/device/rss/rss.html",
            Priority,
        ),
        FeedSource::feed(
            "https://feeds.marketwatch.com/marketwatch/realtimeheadlines/",
            Priority,
        ),
        FeedSource::feed("https://feeds.fortune.com/fortune/headlines", Priority),
        FeedSource::feed(
            "https://feeds.finance.yahoo.com/rss/2.0/headline",
            Priority,
        ),
        FeedSource::feed("https://www.retaildive.com/feeds/news/", Priority),
        FeedSource::feed("https://www.bankingdive.com/feeds/news/", Priority),
        FeedSource::feed("https://www.restaurantdive.com/feeds/news/", Priority),
        FeedSource::feed("https://www.manufacturingdive.com/feeds/news/", Priority),
        FeedSource::feed("https://www.healthcaredive.com/feeds/news/", Priority),
        FeedSource::feed("https://techcrunch.com/feed/", Priority),
        FeedSource {
            url: "https://newsapi.org/v2/everything".to_string(),
            kind: SourceKind::NewsApi,
            tier: Priority,
        },
        FeedSource {
            url: "https://hacker-news.firebaseio.com/v0".to_string(),
            kind: SourceKind::HackerNews,
            tier: Priority,
        },
        FeedSource::feed("https://www.businessinsider.com/rss", Secondary),
        FeedSource::feed("https://feeds.bbci.co.uk/news/business/rss.xml", Secondary),
        FeedSource::feed("https://feeds.inc.com/home/updates", Secondary),
        FeedSource::feed(
            "https://feeds.feedburner.com/fastcompany/headlines",
            Secondary,
        ),
        FeedSource::feed("https://www.utilitydive.com/feeds/news/", Secondary),
        FeedSource::feed("https://www.bizjournals.com/atlanta/feeds/news", Secondary),
        FeedSource::feed("https://www.bizjournals.com/chicago/feeds/news", Secondary),
        FeedSource::feed("https://www.bizjournals.com/newyork/feeds/news", Secondary),
        FeedSource::feed(
            "https://www.bizjournals.com/sanfrancisco/feeds/news",
            Secondary,
        ),
        FeedSource {
            url: "https://www.reddit.com/r/business/hot.json".to_string(),
            kind: SourceKind::Reddit,
            tier: Secondary,
        },
    ]
}

/// Load a feed catalog from a YAML file.
///
/// The file is a YAML sequence of `{url, kind?, tier?}` mappings; `kind`
/// defaults to `feed` and `tier` to `priority`.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogIo`] if the file cannot be read, or
/// [`ConfigError::CatalogParse`] if it is not valid YAML of the expected shape.
pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&raw).map_err(|e| ConfigError::CatalogParse {
        path: path.display().to_string(),
        source: e,
    })
}
