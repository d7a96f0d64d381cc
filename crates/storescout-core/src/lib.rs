//! Shared configuration for the storescout workspace: environment-derived
//! settings and the search query template registry.

mod app_config;
mod config;
mod queries;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use queries::{default_queries, load_queries, QueriesFile, DEFAULT_QUERIES};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read queries file '{path}'")]
    QueriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse queries file")]
    QueriesFileParse(#[source] serde_yaml::Error),

    #[error("{0}")]
    Validation(String),
}
