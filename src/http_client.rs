//! Page fetch client
//!
//! Features:
//! - Fixed browser identity headers on every request
//! - Per-request timeout
//! - Optional TLS certificate bypass for hosts behind intercepting proxies
//! - Brotli, Gzip, Deflate compression (auto-negotiated)
//! - Cookie store shared across the pages of one session

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::fingerprint::BrowserIdentity;

/// Source of raw page markup.
///
/// The aggregator only ever talks to this trait, so tests can serve
/// fixtures from memory.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the body of a successful response.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// HTTP client used against the live site.
pub struct ScrapeClient {
    client: Client,
    identity: BrowserIdentity,
}

impl ScrapeClient {
    /// Create a client with an identity drawn from the config's pool
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        Self::with_identity(config, BrowserIdentity::from_config(config))
    }

    /// Create client with a specific browser identity
    pub fn with_identity(config: &ScrapeConfig, identity: BrowserIdentity) -> Result<Self> {
        let headers = identity.to_headers()?;

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled");
        }

        let client = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .cookie_store(true)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client, identity })
    }

    /// Identity attached to every request
    pub fn identity(&self) -> &BrowserIdentity {
        &self.identity
    }
}

#[async_trait]
impl PageFetcher for ScrapeClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(status = %status, version = ?response.version(), "Response received");

        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
