//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ListingSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and fetching behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Source site endpoints
    #[serde(default)]
    pub site: SiteConfig,

    /// Feed output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Listing page selectors
    #[serde(default)]
    pub selectors: SelectorsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            return Self::default();
        }
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
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_attempts == 0 {
            return Err(AppError::config("fetch.max_attempts must be > 0"));
        }
        if self.output.max_items == 0 {
            return Err(AppError::config("output.max_items must be > 0"));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::config(format!("site.base_url is not a valid URL: {e}")))?;
        for (name, path) in [
            ("site.latest_judgments_path", &self.site.latest_judgments_path),
            ("site.news_path", &self.site.news_path),
        ] {
            if !path.starts_with('/') {
                return Err(AppError::config(format!("{name} must start with '/'")));
            }
        }
        Ok(())
    }
}

/// HTTP client and fetching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Total attempts per URL (first try plus retries)
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: usize,

    /// Base delay for exponential retry backoff, in milliseconds
    #[serde(default = "defaults::retry_base_delay")]
    pub retry_base_delay_ms: u64,

    /// Courtesy delay between the two page requests, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_attempts: defaults::max_attempts(),
            retry_base_delay_ms: defaults::retry_base_delay(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Source site endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the court website
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the "Latest judgments" page
    #[serde(default = "defaults::latest_judgments_path")]
    pub latest_judgments_path: String,

    /// Path of the news hub page (carries the "Future judgments" category)
    #[serde(default = "defaults::news_path")]
    pub news_path: String,
}

impl SiteConfig {
    /// Full URL of the "Latest judgments" page.
    pub fn latest_judgments_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.latest_judgments_path
        )
    }

    /// Full URL of the news hub page.
    pub fn news_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.news_path)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            latest_judgments_path: defaults::latest_judgments_path(),
            news_path: defaults::news_path(),
        }
    }
}

/// Feed output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the feed files are written into
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// File name of the latest-judgments feed
    #[serde(default = "defaults::latest_feed_file")]
    pub latest_feed_file: String,

    /// File name of the future-judgments feed
    #[serde(default = "defaults::future_feed_file")]
    pub future_feed_file: String,

    /// Maximum items kept per feed, most recent first
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            latest_feed_file: defaults::latest_feed_file(),
            future_feed_file: defaults::future_feed_file(),
            max_items: defaults::max_items(),
        }
    }
}

/// Listing selectors per source page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectorsConfig {
    /// Selectors for the "Latest judgments" listing
    #[serde(default)]
    pub latest: ListingSelectors,

    /// Selectors for the news hub listing
    #[serde(default)]
    pub news: ListingSelectors,
}

mod defaults {
    // Fetch defaults
    pub fn user_agent() -> String {
        "uksc-feeds/0.1 (+https://github.com/uksc-feeds/uksc-feeds)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_attempts() -> usize {
        3
    }
    pub fn retry_base_delay() -> u64 {
        500
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://www.supremecourt.uk".into()
    }
    pub fn latest_judgments_path() -> String {
        "/news/latest-judgments".into()
    }
    pub fn news_path() -> String {
        "/news".into()
    }

    // Output defaults
    pub fn output_dir() -> String {
        ".".into()
    }
    pub fn latest_feed_file() -> String {
        "latest-judgments.xml".into()
    }
    pub fn future_feed_file() -> String {
        "future-judgments.xml".into()
    }
    pub fn max_items() -> usize {
        25
    }
}
