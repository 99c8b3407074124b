//! Browser identity for outbound page fetches.
//!
//! The movie site serves its regular HTML only to requests that look like a
//! browser. One identity is drawn from a fixed pool per client and attached
//! to every request as a fixed header set.

use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER, USER_AGENT,
};

use crate::config::ScrapeConfig;
use crate::error::Result;

/// Desktop and mobile identities the pool is seeded with.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Linux; Android 11; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.2 Mobile/15E148 Safari/604.1",
];

pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,ar-EG;q=0.8,ar;q=0.7";
pub const DEFAULT_REFERER: &str = "https://www.themoviedb.org";

/// Identity headers sent with every page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserIdentity {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl BrowserIdentity {
    /// Pick an identity from the configured pool.
    ///
    /// Falls back to the built-in pool when the configured one is empty.
    pub fn from_config(config: &ScrapeConfig) -> Self {
        let mut rng = rand::thread_rng();
        let user_agent = config
            .user_agents
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| random_user_agent().to_string());

        Self {
            user_agent,
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: config.accept_language.clone(),
            referer: config.referer.clone(),
        }
    }

    /// Convert identity to reqwest `HeaderMap`
    pub fn to_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_str(&self.accept)?);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&self.accept_language)?);
        headers.insert(REFERER, HeaderValue::from_str(&self.referer)?);
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        Ok(headers)
    }
}

/// Pick an identity from the built-in pool with default headers.
#[must_use]
pub fn random_identity() -> BrowserIdentity {
    BrowserIdentity {
        user_agent: random_user_agent().to_string(),
        accept: DEFAULT_ACCEPT.to_string(),
        accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        referer: DEFAULT_REFERER.to_string(),
    }
}

fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_identity_comes_from_pool() {
        let identity = random_identity();
        assert!(USER_AGENTS.contains(&identity.user_agent.as_str()));
        assert_eq!(identity.referer, DEFAULT_REFERER);
    }

    #[test]
    fn config_pool_is_respected() {
        let config = ScrapeConfig {
            user_agents: vec!["OnlyAgent/2.0".into()],
            accept_language: "de-DE".into(),
            ..ScrapeConfig::default()
        };
        let identity = BrowserIdentity::from_config(&config);
        assert_eq!(identity.user_agent, "OnlyAgent/2.0");
        assert_eq!(identity.accept_language, "de-DE");
    }

    #[test]
    fn empty_config_pool_falls_back() {
        let config = ScrapeConfig {
            user_agents: Vec::new(),
            ..ScrapeConfig::default()
        };
        let identity = BrowserIdentity::from_config(&config);
        assert!(USER_AGENTS.contains(&identity.user_agent.as_str()));
    }

    #[test]
    fn headers_include_fixed_set() {
        let headers = random_identity().to_headers().unwrap();
        assert!(headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
        assert_eq!(headers[REFERER], DEFAULT_REFERER);
        assert_eq!(headers[CONNECTION], "keep-alive");
    }

    #[test]
    fn invalid_header_text_is_an_error() {
        let identity = BrowserIdentity {
            user_agent: "bad\nagent".into(),
            ..random_identity()
        };
        assert!(identity.to_headers().is_err());
    }
}
