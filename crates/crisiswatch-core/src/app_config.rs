use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Optional YAML feed catalog; the built-in catalog is used when unset.
    pub feeds_path: Option<PathBuf>,
    /// Optional NewsAPI credential; the NewsAPI source is skipped when unset.
    pub newsapi_key: Option<String>,
    pub user_agent: String,
    pub per_source_limit: usize,
    pub per_source_timeout_secs: u64,
    pub overall_timeout_secs: u64,
    /// `1` selects sequential fetching with the politeness delay below.
    pub max_concurrent_sources: usize,
    pub inter_request_delay_ms: u64,
    /// Candidates scoring at or below this survive the inclusion filter.
    pub sentiment_threshold: f32,
    /// Candidates matching at least this many keywords survive regardless of score.
    pub keyword_override_count: usize,
    pub max_extra_rounds: u32,
    /// Retention sweep cutoff; pruning is disabled when unset.
    pub retention_hours: Option<u64>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("feeds_path", &self.feeds_path)
            .field("database_url", &"[redacted]")
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .field("user_agent", &self.user_agent)
            .field("per_source_limit", &self.per_source_limit)
            .field("per_source_timeout_secs", &self.per_source_timeout_secs)
            .field("overall_timeout_secs", &self.overall_timeout_secs)
            .field("max_concurrent_sources", &self.max_concurrent_sources)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("sentiment_threshold", &self.sentiment_threshold)
            .field("keyword_override_count", &self.keyword_override_count)
            .field("max_extra_rounds", &self.max_extra_rounds)
            .field("retention_hours", &self.retention_hours)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
