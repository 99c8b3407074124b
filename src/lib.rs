//! `tmdb-scrape` - movie metadata scraper for The Movie Database website
//!
//! # Features
//!
//! - **Search**: one candidate per result card, with layered title fallbacks
//! - **Details**: detail page, image galleries, trailers and top-billed cast
//!   merged into one record
//! - **Browser Identity**: rotating user agents with browser-like headers
//! - **Failure Containment**: a broken page only costs its own fields
//!
//! # Example
//!
//! ```rust,no_run
//! use tmdb_scrape::{Aggregator, ScrapeClient, ScrapeConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScrapeConfig::default();
//!     let aggregator = Aggregator::new(ScrapeClient::new(&config)?, &config);
//!     let candidates = aggregator.search("heat").await?;
//!     println!("Found {} movies", candidates.len());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod http_client;
pub mod model;
pub mod output;
pub mod pages;

pub use aggregate::Aggregator;
pub use config::{load_config, load_config_from, ScrapeConfig};
pub use error::{Result, ScrapeError};
pub use fingerprint::{random_identity, BrowserIdentity};
pub use http_client::{PageFetcher, ScrapeClient};
pub use model::{CandidateRecord, CastMember, DetailRecord, MovieDetails, TrailerRecord};
pub use pages::{PageKind, PageOutcome};

/// Version of tmdb-scrape
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
