use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown search mode: {0}")]
    UnknownSearchMode(String),
}

/// Which backend endpoint the search page queries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Keyword,
    Semantic,
}

impl FromStr for SearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(SearchMode::Keyword),
            "semantic" => Ok(SearchMode::Semantic),
            other => Err(ConfigError::UnknownSearchMode(other.to_string())),
        }
    }
}

/// Application configuration
/// In debug builds: loads a .env file first, then reads the environment
/// In release builds: reads the environment only
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the backend serving search and indexing endpoints
    pub api_base_url: String,
    /// Maximum number of images requested per search
    pub search_limit: usize,
    pub search_mode: SearchMode,
    /// Interval between indexing status polls
    pub status_poll_interval: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// How long a settled search result counts as fresh
    pub query_stale_time: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            search_mode: SearchMode::Keyword,
            status_poll_interval: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(30),
            query_stale_time: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration based on build mode
    pub fn load() -> Self {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Dev mode activated - loaded .env file");
            } else {
                info!("No .env file found, reading process environment");
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source; unset or invalid
    /// values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup("PICTO_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let search_limit = parse_or(&lookup, "PICTO_SEARCH_LIMIT", defaults.search_limit);

        let search_mode = parse_or(&lookup, "PICTO_SEARCH_MODE", defaults.search_mode);

        let status_poll_interval = Duration::from_millis(parse_or(
            &lookup,
            "PICTO_STATUS_POLL_MS",
            defaults.status_poll_interval.as_millis() as u64,
        ));

        let request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "PICTO_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        ));

        let query_stale_time = Duration::from_millis(parse_or(
            &lookup,
            "PICTO_QUERY_STALE_MS",
            defaults.query_stale_time.as_millis() as u64,
        ));

        info!(
            "Config: backend {} ({:?} search, limit {})",
            api_base_url, search_mode, search_limit
        );

        Self {
            api_base_url,
            search_limit,
            search_mode,
            status_poll_interval,
            request_timeout,
            query_stale_time,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring invalid {}={:?}: {}", name, raw, e);
                default
            }
        },
        None => default,
    }
}
