//! Configuration management for the vkwall collector
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default VK API endpoint host
pub const DEFAULT_API_BASE_URL: &str = "https://api.vk.com";

/// Default VK API version
pub const DEFAULT_API_VERSION: &str = "5.199";

/// Default size at which the log file is rotated (5 MiB)
pub const DEFAULT_LOG_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// VK API access
    pub api: ApiConfig,

    /// Collection targets and pacing
    pub collector: CollectorConfig,

    /// Output file
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// VK API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Pre-validated access token
    pub access_token: String,

    /// API version sent as `v`
    pub version: String,

    /// Endpoint host, overridable for testing
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Community ids to collect, processed in order
    pub group_ids: Vec<u64>,

    /// Post quota per community
    pub posts_per_group: usize,

    /// Pause between page requests, in seconds
    pub pause_secs: f64,

    /// Delay before retrying after HTTP 429, in seconds
    pub rate_limit_backoff_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file path
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,

    /// Directory for rolling log files
    pub dir: PathBuf,

    /// Number of rotated log files to keep
    pub max_files: usize,

    /// Size in bytes at which the active log file is rotated
    pub max_size_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            version: String::from(DEFAULT_API_VERSION),
            base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: 30,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            group_ids: Vec::new(),
            posts_per_group: 500,
            pause_secs: 2.0,
            rate_limit_backoff_secs: 60,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("vk_posts.csv"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
            dir: PathBuf::from("logs"),
            max_files: 3,
            max_size_bytes: DEFAULT_LOG_MAX_SIZE_BYTES,
        }
    }
}

/// Parse a comma-separated list of community ids
pub fn parse_group_ids(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.strip_prefix('-')
                .unwrap_or(s)
                .parse::<u64>()
                .with_context(|| format!("Invalid community id: {s}"))
        })
        .collect()
}

impl Config {
    /// Load configuration from environment variables, defaulting anything unset
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let access_token = std::env::var("VKWALL_ACCESS_TOKEN").unwrap_or_default();

        let version = std::env::var("VKWALL_API_VERSION").unwrap_or(defaults.api.version);

        let base_url = std::env::var("VKWALL_API_BASE_URL").unwrap_or(defaults.api.base_url);

        let group_ids = match std::env::var("VKWALL_GROUP_IDS") {
            Ok(raw) => parse_group_ids(&raw).context("Failed to parse VKWALL_GROUP_IDS")?,
            Err(_) => Vec::new(),
        };

        let posts_per_group = match std::env::var("VKWALL_POSTS_PER_GROUP") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Failed to parse VKWALL_POSTS_PER_GROUP: {raw}"))?,
            Err(_) => defaults.collector.posts_per_group,
        };

        let pause_secs = match std::env::var("VKWALL_PAUSE_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Failed to parse VKWALL_PAUSE_SECS: {raw}"))?,
            Err(_) => defaults.collector.pause_secs,
        };

        let output_path = std::env::var("VKWALL_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.path);

        let log_level = std::env::var("VKWALL_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format = std::env::var("VKWALL_LOG_FORMAT").unwrap_or(defaults.logging.format);

        let log_dir = std::env::var("VKWALL_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.logging.dir);

        Ok(Self {
            api: ApiConfig {
                access_token,
                version,
                base_url,
                ..defaults.api
            },
            collector: CollectorConfig {
                group_ids,
                posts_per_group,
                pause_secs,
                ..defaults.collector
            },
            output: OutputConfig { path: output_path },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
                dir: log_dir,
                ..defaults.logging
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.access_token.trim().is_empty() {
            anyhow::bail!("access_token must not be empty");
        }

        if self.api.version.trim().is_empty() {
            anyhow::bail!("api version must not be empty");
        }

        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid api base_url: {}", self.api.base_url))?;

        if !self.collector.pause_secs.is_finite() || self.collector.pause_secs < 0.0 {
            anyhow::bail!("pause_secs must be a non-negative number");
        }

        if self.logging.max_files == 0 {
            anyhow::bail!("logging.max_files must be greater than 0");
        }

        if self.logging.max_size_bytes == 0 {
            anyhow::bail!("logging.max_size_bytes must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Get the inter-request pause as Duration
    #[must_use]
    pub fn pause(&self) -> Duration {
        Duration::try_from_secs_f64(self.collector.pause_secs).unwrap_or(Duration::ZERO)
    }

    /// Get the rate-limit backoff as Duration
    #[must_use]
    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_secs(self.collector.rate_limit_backoff_secs)
    }
}
