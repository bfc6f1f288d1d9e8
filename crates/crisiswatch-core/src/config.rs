use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Optional var: unset is None, set-but-unparseable is an error.
    let parse_opt_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("CRISISWATCH_ENV", "development"));
    let log_level = or_default("CRISISWATCH_LOG_LEVEL", "info");
    let feeds_path = lookup("CRISISWATCH_FEEDS_PATH").ok().map(PathBuf::from);
    let newsapi_key = lookup("NEWSAPI_KEY").ok();

    let user_agent = or_default(
        "CRISISWATCH_USER_AGENT",
        "crisiswatch/0.1 (business-distress-monitor)",
    );
    let per_source_limit = parse_usize("CRISISWATCH_PER_SOURCE_LIMIT", "20")?;
    let per_source_timeout_secs = parse_u64("CRISISWATCH_PER_SOURCE_TIMEOUT_SECS", "10")?;
    let overall_timeout_secs = parse_u64("CRISISWATCH_OVERALL_TIMEOUT_SECS", "30")?;
    let max_concurrent_sources = parse_usize("CRISISWATCH_MAX_CONCURRENT_SOURCES", "10")?;
    let inter_request_delay_ms = parse_u64("CRISISWATCH_INTER_REQUEST_DELAY_MS", "250")?;

    let sentiment_threshold = parse_f32("CRISISWATCH_SENTIMENT_THRESHOLD", "0.4")?;
    let keyword_override_count = parse_usize("CRISISWATCH_KEYWORD_OVERRIDE_COUNT", "2")?;
    let max_extra_rounds = parse_u32("CRISISWATCH_MAX_EXTRA_ROUNDS", "2")?;
    let retention_hours = parse_opt_u64("CRISISWATCH_RETENTION_HOURS")?;

    let db_max_connections = parse_u32("CRISISWATCH_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("CRISISWATCH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("CRISISWATCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        feeds_path,
        newsapi_key,
        user_agent,
        per_source_limit,
        per_source_timeout_secs,
        overall_timeout_secs,
        max_concurrent_sources,
        inter_request_delay_ms,
        sentiment_threshold,
        keyword_override_count,
        max_extra_rounds,
        retention_hours,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("DATABASE_URL", "sqlite://crisiswatch-test.db");
        m
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_database_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DATABASE_URL"),
            "expected MissingEnvVar(DATABASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.feeds_path.is_none());
        assert!(cfg.newsapi_key.is_none());
        assert_eq!(cfg.per_source_limit, 20);
        assert_eq!(cfg.per_source_timeout_secs, 10);
        assert_eq!(cfg.overall_timeout_secs, 30);
        assert_eq!(cfg.max_concurrent_sources, 10);
        assert_eq!(cfg.inter_request_delay_ms, 250);
        assert!((cfg.sentiment_threshold - 0.4).abs() < f32::EPSILON);
        assert_eq!(cfg.keyword_override_count, 2);
        assert_eq!(cfg.max_extra_rounds, 2);
        assert!(cfg.retention_hours.is_none());
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.db_min_connections, 1);
        assert_eq!(cfg.db_acquire_timeout_secs, 10);
    }

    #[test]
    fn sentiment_threshold_override() {
        let mut map = full_env();
        map.insert("CRISISWATCH_SENTIMENT_THRESHOLD", "0.2");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.sentiment_threshold - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn sentiment_threshold_invalid() {
        let mut map = full_env();
        map.insert("CRISISWATCH_SENTIMENT_THRESHOLD", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRISISWATCH_SENTIMENT_THRESHOLD"),
            "expected InvalidEnvVar(CRISISWATCH_SENTIMENT_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn newsapi_key_is_optional() {
        let mut map = full_env();
        map.insert("NEWSAPI_KEY", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.newsapi_key.as_deref(), Some("secret-token"));
    }

    #[test]
    fn retention_hours_unset_disables_pruning() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.retention_hours.is_none());
    }

    #[test]
    fn retention_hours_override() {
        let mut map = full_env();
        map.insert("CRISISWATCH_RETENTION_HOURS", "48");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.retention_hours, Some(48));
    }

    #[test]
    fn retention_hours_invalid() {
        let mut map = full_env();
        map.insert("CRISISWATCH_RETENTION_HOURS", "two-days");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRISISWATCH_RETENTION_HOURS"),
            "expected InvalidEnvVar(CRISISWATCH_RETENTION_HOURS), got: {result:?}"
        );
    }

    #[test]
    fn max_concurrent_sources_override() {
        let mut map = full_env();
        map.insert("CRISISWATCH_MAX_CONCURRENT_SOURCES", "1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_concurrent_sources, 1);
    }

    #[test]
    fn max_concurrent_sources_invalid() {
        let mut map = full_env();
        map.insert("CRISISWATCH_MAX_CONCURRENT_SOURCES", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRISISWATCH_MAX_CONCURRENT_SOURCES"),
            "expected InvalidEnvVar(CRISISWATCH_MAX_CONCURRENT_SOURCES), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = full_env();
        map.insert("NEWSAPI_KEY", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("secret-token"), "key leaked: {debug}");
        assert!(!debug.contains("crisiswatch-test.db"), "url leaked: {debug}");
    }
}
