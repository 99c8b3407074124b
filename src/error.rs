//! Scrape pipeline errors

use std::path::PathBuf;

use thiserror::Error;

use crate::pages::PageKind;

/// Errors raised while fetching or interpreting movie pages.
///
/// Field-level "no data" is never an error; it is `None`.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{page} page has no `{selector}` panel")]
    MissingPanel {
        page: PageKind,
        selector: &'static str,
    },

    #[error("candidate \"{title}\" has no detail page URL")]
    MissingDetailUrl { title: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl ScrapeError {
    /// True for errors that mean the markup did not have the expected shape.
    pub fn is_structure_mismatch(&self) -> bool {
        matches!(self, Self::MissingPanel { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
