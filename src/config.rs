//! Scraper configuration loaded from `~/.config/tmdb-scrape/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ScrapeError};
use crate::fingerprint::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_REFERER, USER_AGENTS};

/// Root of the movie database website.
pub const DEFAULT_BASE_URL: &str = "https://www.themoviedb.org";

/// Runtime settings for the fetch client and the aggregator.
///
/// Every field has a default, so an empty or partial file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Site root used to build search and detail URLs.
    pub base_url: String,
    /// Pause before every page fetch except the initial search.
    ///
    /// `0` turns pacing off. Only meant for local fixtures; a warning is
    /// logged when a config file asks for it.
    pub request_delay_ms: u64,
    /// Per-request timeout. Must be at least one second.
    pub timeout_secs: u64,
    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,
    /// Browser identities to pick from, one per client.
    pub user_agents: Vec<String>,
    pub accept_language: String,
    pub referer: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay_ms: 500,
            timeout_secs: 10,
            accept_invalid_certs: false,
            user_agents: USER_AGENTS.iter().map(|ua| (*ua).to_string()).collect(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Site root without a trailing slash.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Parse a config from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ScrapeError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validated(origin)
    }

    fn validated(mut self, origin: &Path) -> Result<Self> {
        self.user_agents.retain(|ua| !ua.trim().is_empty());
        if self.user_agents.is_empty() {
            return Err(ScrapeError::Config {
                path: origin.to_path_buf(),
                message: "user_agents must list at least one browser identity".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::Config {
                path: origin.to_path_buf(),
                message: "timeout_secs must be at least 1".into(),
            });
        }
        if self.request_delay_ms == 0 {
            tracing::warn!("request_delay_ms is 0, page fetches will not be paced");
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ScrapeError::Config {
                path: origin.to_path_buf(),
                message: format!("base_url `{}` is not an absolute URL", self.base_url),
            });
        }
        Ok(self)
    }
}

/// Load the config from the default location.
///
/// Returns defaults if the file doesn't exist (the config is optional).
pub fn load_config() -> Result<ScrapeConfig> {
    load_config_from(&config_path())
}

/// Load the config from an explicit path, falling back to defaults when absent.
pub fn load_config_from(path: &Path) -> Result<ScrapeConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ScrapeConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    ScrapeConfig::from_toml(&content, path)
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tmdb-scrape")
        .join("config.toml")
}
