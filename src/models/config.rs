//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Input/output file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        let base = url::Url::parse(&self.crawler.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation(
                "crawler.base_url must be an absolute http(s) URL",
            ));
        }
        if self.crawler.base_url.ends_with('/') {
            return Err(AppError::validation(
                "crawler.base_url must not have a trailing slash",
            ));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the catalog site, without a trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay after each real network fetch, in seconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_secs: defaults::request_delay(),
        }
    }
}

/// Input/output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// CSV file with `title` and `release_year` columns
    #[serde(default = "defaults::titles_file")]
    pub titles_file: String,

    /// Directory where reviews.json / reviews.csv are written
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            titles_file: defaults::titles_file(),
            output_dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn base_url() -> String {
        "https://www.filmaffinity.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        10
    }

    // Path defaults
    pub fn titles_file() -> String {
        "testdata/titles.csv".into()
    }
    pub fn output_dir() -> String {
        "output".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unparseable_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Url(_))));
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.crawler.base_url = "ftp://www.filmaffinity.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_trailing_slash_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "https://www.filmaffinity.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[crawler]\nrequest_delay_secs = 0\n").unwrap();
        assert_eq!(config.crawler.request_delay_secs, 0);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.paths.titles_file, "testdata/titles.csv");
    }
}
