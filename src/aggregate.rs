//! Multi-page aggregation.
//!
//! Drives the detail page and every sub-page scraper for one movie,
//! strictly one fetch at a time, and merges the partial results into a
//! single [`DetailRecord`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tmdb_scrape::{Aggregator, ScrapeClient, ScrapeConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ScrapeConfig::default();
//! let aggregator = Aggregator::new(ScrapeClient::new(&config)?, &config);
//!
//! let candidates = aggregator.search("the matrix").await?;
//! if let Some(first) = candidates.first() {
//!     let record = aggregator.aggregate(first).await?;
//!     println!("{}", record.title());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::http_client::PageFetcher;
use crate::model::{CandidateRecord, DetailRecord};
use crate::pages::{
    fetch_and_extract, scrape_page, CastScraper, DetailScraper, MediaKind, MediaScraper,
    SearchScraper, TrailerScraper,
};

/// Sequential, paced scraper for one site.
pub struct Aggregator<F> {
    fetcher: F,
    search: SearchScraper,
    delay: Duration,
}

impl<F: PageFetcher> Aggregator<F> {
    pub fn new(fetcher: F, config: &ScrapeConfig) -> Self {
        Self {
            fetcher,
            search: SearchScraper::new(config.site_root()),
            delay: config.request_delay(),
        }
    }

    /// Replace the pause applied before every page fetch after the search.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Search the site and return one candidate per result card.
    ///
    /// This is the entry point, so it is not paced, and a failure here is
    /// returned: there is nothing to continue with.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateRecord>> {
        let candidates = fetch_and_extract(&self.search, &self.fetcher, query)
            .await?
            .unwrap_or_default();
        info!(count = candidates.len(), "Search finished");
        Ok(candidates)
    }

    /// Build the merged record for one candidate.
    ///
    /// Only a missing detail URL is an error. Every page failure just
    /// leaves its fields out of the record.
    #[instrument(skip(self, candidate), fields(title = %candidate.title))]
    pub async fn aggregate(&self, candidate: &CandidateRecord) -> Result<DetailRecord> {
        let movie_url = candidate
            .detail_url
            .as_deref()
            .ok_or_else(|| ScrapeError::MissingDetailUrl {
                title: candidate.title.clone(),
            })?;

        let mut record = DetailRecord::from_candidate(candidate);

        if let Some(details) = self.page(&DetailScraper, movie_url).await {
            record.apply_details(details);
        }

        for kind in MediaKind::ALL {
            let urls = self
                .page(&MediaScraper::new(kind), movie_url)
                .await
                .unwrap_or_default();
            match kind {
                MediaKind::Logos => record.attach_logos(urls),
                MediaKind::Backdrops => record.attach_backdrops(urls),
                MediaKind::Posters => record.attach_posters(urls),
            }
        }

        if let Some(trailers) = self.page(&TrailerScraper, movie_url).await {
            record.attach_trailers(trailers);
        }
        if let Some(cast) = self.page(&CastScraper, movie_url).await {
            record.attach_cast(cast);
        }

        debug!(movie = %movie_url, "Aggregation finished");
        Ok(record)
    }

    /// Aggregate every candidate in turn, keeping input order.
    ///
    /// Candidates without a detail URL are skipped silently.
    pub async fn aggregate_all(&self, candidates: &[CandidateRecord]) -> Vec<DetailRecord> {
        let mut records = Vec::with_capacity(candidates.len());
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.detail_url.is_none() {
                debug!(index, title = %candidate.title, "Skipping candidate without detail URL");
                continue;
            }
            info!(
                "Scraping details for movie {}/{}: {}",
                index + 1,
                candidates.len(),
                candidate.title
            );
            if let Ok(record) = self.aggregate(candidate).await {
                records.push(record);
            }
        }
        records
    }

    async fn page<S>(&self, scraper: &S, movie_url: &str) -> Option<S::Output>
    where
        S: crate::pages::PageScraper,
    {
        scrape_page(scraper, &self.fetcher, movie_url, self.delay)
            .await
            .into_option()
    }
}
