//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Backend origin; endpoints live under `{api_url}/api/v1`.
    pub api_url: Url,
    pub token_path: PathBuf,
    pub log_level: Level,
    /// Minimum time a loading notification stays visible.
    pub min_loading: Duration,
    /// `limit` query parameter sent with every list request.
    pub list_limit: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url_str =
            lookup("API_URL").ok_or_else(|| ConfigError::MissingVar("API_URL".to_string()))?;
        let api_url = Url::parse(api_url_str.trim_end_matches('/'))
            .map_err(|e| ConfigError::InvalidValue("API_URL".to_string(), e.to_string()))?;

        let token_path = lookup("TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.dnada/token.json"));

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let min_loading_ms = match lookup("MIN_LOADING_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("MIN_LOADING_MS".to_string(), e.to_string())
            })?,
            None => 500,
        };

        let list_limit = match lookup("LIST_LIMIT") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidValue("LIST_LIMIT".to_string(), e.to_string()))?,
            None => 2000,
        };

        Ok(Self {
            api_url,
            token_path,
            log_level,
            min_loading: Duration::from_millis(min_loading_ms),
            list_limit,
        })
    }

    /// The origin without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}
