use crate::error::{FetchError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the metadata API and artwork fetching.
///
/// Loaded from `TMDB_`-prefixed environment variables, e.g. `TMDB_API_KEY`.
#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    /// TMDB API key
    pub api_key: String,

    /// Metadata API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Image CDN base URL; size segments are appended to it
    #[serde(default = "default_image_base")]
    pub image_base: String,

    /// Locale sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Attempts per fetch, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed wait between attempts
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Backdrop used when none can be fetched
    #[serde(default = "default_fallback_backdrop_url")]
    pub fallback_backdrop_url: String,
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_secs() -> u64 {
    2
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_fallback_backdrop_url() -> String {
    "https://www.example.com/default-background.jpg".to_string()
}

impl FetcherConfig {
    /// Defaults for everything except the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: default_api_base(),
            image_base: default_image_base(),
            language: default_language(),
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_backdrop_url: default_fallback_backdrop_url(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("TMDB_")
            .from_env::<FetcherConfig>()
            .map_err(|e| FetchError::Config(e.to_string()))
    }

    /// Attempt count, never below one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::new("key");
        assert_eq!(config.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.language, "en-US");
        assert_eq!(config.attempts(), 3);
        assert_eq!(config.backoff(), Duration::from_secs(2));
    }

    #[test]
    fn test_attempts_clamped() {
        let mut config = FetcherConfig::new("key");
        config.max_attempts = 0;
        assert_eq!(config.attempts(), 1);
    }

    #[test]
    fn test_deserialize_from_pairs() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "abc".to_string()),
            ("TMDB_MAX_ATTEMPTS".to_string(), "5".to_string()),
            ("TMDB_LANGUAGE".to_string(), "de-DE".to_string()),
        ];
        let config: FetcherConfig = envy::prefixed("TMDB_").from_iter(vars).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.language, "de-DE");
        assert_eq!(config.backoff_secs, 2);
    }

    #[test]
    fn test_missing_api_key() {
        let vars: Vec<(String, String)> = Vec::new();
        let result = envy::prefixed("TMDB_").from_iter::<_, FetcherConfig>(vars);
        assert!(result.is_err());
    }
}
