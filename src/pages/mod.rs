//! Per-page scrapers.
//!
//! Each movie is spread over several pages on the site: the main detail
//! page plus one page per media category. Every page kind gets its own
//! [`PageScraper`], and [`scrape_page`] runs any of them with failure
//! containment, so a broken page only costs its own fields.
//!
//! # Architecture
//!
//! - [`PageScraper`]: builds a page URL and extracts one partial result
//! - [`scrape_page`]: paced fetch + parse + extract, never fails
//! - [`PageOutcome`]: found / empty / failed, collapsed by the aggregator

/// Find a page's panel by a literal CSS selector, see [`find_panel`].
macro_rules! panel {
    ($document:expr, $page:expr, $css:literal) => {
        $crate::pages::find_panel($document, $page, $crate::extract::selector!($css), $css)
    };
}
pub(crate) use panel;

pub mod cast;
pub mod detail;
pub mod media;
pub mod search;
pub mod trailers;

use std::fmt;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::http_client::PageFetcher;

pub use cast::{CastScraper, CAST_LIMIT};
pub use detail::DetailScraper;
pub use media::{MediaKind, MediaScraper};
pub use search::SearchScraper;
pub use trailers::TrailerScraper;

/// The kinds of page a movie's record is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Search,
    Detail,
    Logos,
    Backdrops,
    Posters,
    Trailers,
    Cast,
}

impl PageKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Detail => "detail",
            Self::Logos => "logos",
            Self::Backdrops => "backdrops",
            Self::Posters => "posters",
            Self::Trailers => "trailers",
            Self::Cast => "cast",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one contained page scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<T> {
    Found(T),
    /// The page was fetched but held nothing for us.
    Empty,
    /// Fetching or reading the page failed; the message is for diagnostics.
    Failed(String),
}

impl<T> PageOutcome<T> {
    /// `Empty` and `Failed` both mean "nothing to add".
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Scraper for one kind of page.
pub trait PageScraper {
    type Output;

    fn kind(&self) -> PageKind;

    /// URL of this page for `target` (a movie URL, or the query for search).
    fn page_url(&self, target: &str) -> String;

    /// Read the page. `Ok(None)` means the page had nothing to report.
    fn extract(&self, document: &Html) -> Result<Option<Self::Output>>;
}

/// Fetch, parse and extract one page, propagating every failure.
pub async fn fetch_and_extract<S, F>(
    scraper: &S,
    fetcher: &F,
    target: &str,
) -> Result<Option<S::Output>>
where
    S: PageScraper + ?Sized,
    F: PageFetcher + ?Sized,
{
    let url = scraper.page_url(target);
    let body = fetcher.fetch_page(&url).await?;
    parse_and_extract(scraper, &body)
}

/// Run one page scraper with failure containment.
///
/// Sleeps `delay` first, then fetches. Transport errors and markup that
/// lacks the expected panel both end up as a non-`Found` outcome; nothing
/// is propagated.
pub async fn scrape_page<S, F>(
    scraper: &S,
    fetcher: &F,
    movie_url: &str,
    delay: Duration,
) -> PageOutcome<S::Output>
where
    S: PageScraper + ?Sized,
    F: PageFetcher + ?Sized,
{
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let kind = scraper.kind();
    match fetch_and_extract(scraper, fetcher, movie_url).await {
        Ok(Some(value)) => PageOutcome::Found(value),
        Ok(None) => {
            debug!(page = %kind, movie = %movie_url, "Page had nothing to extract");
            PageOutcome::Empty
        }
        Err(e) if e.is_structure_mismatch() => {
            debug!(page = %kind, movie = %movie_url, "{e}");
            PageOutcome::Empty
        }
        Err(e) => {
            warn!(page = %kind, movie = %movie_url, "Page scrape failed: {e}");
            PageOutcome::Failed(e.to_string())
        }
    }
}

fn parse_and_extract<S: PageScraper + ?Sized>(
    scraper: &S,
    body: &str,
) -> Result<Option<S::Output>> {
    let document = Html::parse_document(body);
    scraper.extract(&document)
}

/// Locate the named panel or report the page as structurally different.
pub(crate) fn find_panel<'a>(
    document: &'a Html,
    page: PageKind,
    selector: &Selector,
    css: &'static str,
) -> Result<ElementRef<'a>> {
    document
        .select(selector)
        .next()
        .ok_or(ScrapeError::MissingPanel {
            page,
            selector: css,
        })
}

/// Append a path to a movie URL without doubling the slash.
pub(crate) fn sub_page_url(movie_url: &str, path: &str) -> String {
    format!("{}{path}", movie_url.trim_end_matches('/'))
}
