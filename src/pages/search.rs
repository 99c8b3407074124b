//! Search results listing.

use scraper::{ElementRef, Html};
use url::Url;

use super::{PageKind, PageScraper};
use crate::error::Result;
use crate::extract::card::{alternative_title, card_title, detail_href, movie_id, poster_url};
use crate::extract::{attr, select_text, selector};
use crate::model::CandidateRecord;

/// Turns a search results page into one candidate per listing card.
pub struct SearchScraper {
    site_root: String,
}

impl SearchScraper {
    pub fn new(site_root: &str) -> Self {
        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
        }
    }

    /// Read every card on a search page, in document order.
    pub fn parse_cards(&self, document: &Html) -> Vec<CandidateRecord> {
        document
            .select(selector!("div.card"))
            .map(|card| self.candidate_from_card(card))
            .collect()
    }

    fn candidate_from_card(&self, card: ElementRef<'_>) -> CandidateRecord {
        let href = detail_href(card);
        let anchor = card.select(selector!("a.result")).next();

        CandidateRecord {
            title: card_title(card),
            alternative_title: alternative_title(card),
            detail_url: href.as_deref().and_then(|h| self.absolute_url(h)),
            release_date: select_text(card, selector!("span.release_date")),
            overview: select_text(card, selector!("div.overview p")),
            poster_url: poster_url(card),
            media_type: anchor.and_then(|a| attr(a, "data-media-type")),
            is_adult: anchor
                .and_then(|a| attr(a, "data-media-adult"))
                .map(|flag| flag == "true"),
            external_id: href.as_deref().and_then(movie_id),
        }
    }

    fn absolute_url(&self, href: &str) -> Option<String> {
        let root = Url::parse(&self.site_root).ok()?;
        root.join(href).ok().map(String::from)
    }
}

impl PageScraper for SearchScraper {
    type Output = Vec<CandidateRecord>;

    fn kind(&self) -> PageKind {
        PageKind::Search
    }

    /// `target` is the free-text query.
    fn page_url(&self, target: &str) -> String {
        format!("{}/search?query={}", self.site_root, encode_query(target))
    }

    fn extract(&self, document: &Html) -> Result<Option<Self::Output>> {
        Ok(Some(self.parse_cards(document)))
    }
}

/// Lower-case the query and join its percent-encoded words with `+`.
pub fn encode_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| urlencoding::encode(&word.to_lowercase()).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}
