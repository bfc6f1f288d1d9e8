//! Shared configuration and source-catalog types for crisiswatch.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod sources;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{default_sources, load_sources, FeedSource, SourceKind, SourceTier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feed catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed catalog {path}: {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
