use std::time::Duration;

use chrono::{DateTime, Utc};

use crisiswatch_core::AppConfig;

/// An unfiltered article fetched from a source, before scoring.
#[derive(Debug, Clone)]
pub struct CandidateArticle {
    pub title: String,
    /// Article URL; the primary identity for dedup and storage.
    pub link: String,
    /// Summary text with markup already stripped.
    pub description: String,
    /// Publication timestamp; `None` when absent or unparseable.
    pub published: Option<DateTime<Utc>>,
    /// Display name: the source-supplied channel title, or the URL host.
    pub source: String,
}

/// A candidate that survived classification and the inclusion filter.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub article: CandidateArticle,
    /// Matched crisis keywords; non-empty by construction.
    pub matched_keywords: Vec<String>,
    /// Polarity in [-1.0, 1.0].
    pub sentiment: f32,
    /// Comma-joined crisis categories, or `general`.
    pub category: String,
}

/// Knobs for one collection cycle.
#[derive(Clone)]
pub struct CollectorOptions {
    pub user_agent: String,
    /// Max entries read per source per cycle.
    pub per_source_limit: usize,
    /// Deadline for a single source fetch.
    pub per_source_timeout: Duration,
    /// Deadline for the whole fan-out; a slow tail is abandoned, not awaited.
    pub overall_timeout: Duration,
    /// Bounded worker pool size; `1` selects sequential polite mode.
    pub max_concurrent_sources: usize,
    /// Delay between requests in sequential mode.
    pub inter_request_delay: Duration,
    /// Candidates scoring at or below this survive the inclusion filter.
    pub sentiment_threshold: f32,
    /// Candidates with at least this many matched keywords survive regardless
    /// of sentiment.
    pub keyword_override_count: usize,
    /// Cap on retry-for-volume rounds after the priority pass.
    pub max_extra_rounds: u32,
    /// NewsAPI credential; the NewsAPI source is skipped when `None`.
    pub newsapi_key: Option<String>,
}

impl std::fmt::Debug for CollectorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorOptions")
            .field("user_agent", &self.user_agent)
            .field("per_source_limit", &self.per_source_limit)
            .field("per_source_timeout", &self.per_source_timeout)
            .field("overall_timeout", &self.overall_timeout)
            .field("max_concurrent_sources", &self.max_concurrent_sources)
            .field("inter_request_delay", &self.inter_request_delay)
            .field("sentiment_threshold", &self.sentiment_threshold)
            .field("keyword_override_count", &self.keyword_override_count)
            .field("max_extra_rounds", &self.max_extra_rounds)
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl CollectorOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            per_source_limit: config.per_source_limit,
            per_source_timeout: Duration::from_secs(config.per_source_timeout_secs),
            overall_timeout: Duration::from_secs(config.overall_timeout_secs),
            max_concurrent_sources: config.max_concurrent_sources,
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
            sentiment_threshold: config.sentiment_threshold,
            keyword_override_count: config.keyword_override_count,
            max_extra_rounds: config.max_extra_rounds,
            newsapi_key: config.newsapi_key.clone(),
        }
    }
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            user_agent: "crisiswatch/0.1 (business-distress-monitor)".to_string(),
            per_source_limit: 20,
            per_source_timeout: Duration::from_secs(10),
            overall_timeout: Duration::from_secs(30),
            max_concurrent_sources: 10,
            inter_request_delay: Duration::from_millis(250),
            sentiment_threshold: 0.4,
            keyword_override_count: 2,
            max_extra_rounds: 2,
            newsapi_key: None,
        }
    }
}
