//! Trailers tab of the videos page.

use scraper::{ElementRef, Html};

use super::{panel, sub_page_url, PageKind, PageScraper};
use crate::error::Result;
use crate::extract::{attr, select_text, selector};
use crate::model::TrailerRecord;

pub struct TrailerScraper;

impl PageScraper for TrailerScraper {
    type Output = Vec<TrailerRecord>;

    fn kind(&self) -> PageKind {
        PageKind::Trailers
    }

    fn page_url(&self, target: &str) -> String {
        sub_page_url(target, "/videos?active_nav_item=Trailers")
    }

    fn extract(&self, document: &Html) -> Result<Option<Vec<TrailerRecord>>> {
        let panel = panel!(document, PageKind::Trailers, "section.panel.video")?;

        let trailers: Vec<TrailerRecord> = panel
            .select(selector!("div.video.card.default"))
            .map(trailer_from_card)
            .filter(|trailer| !trailer.is_empty())
            .collect();

        Ok((!trailers.is_empty()).then_some(trailers))
    }
}

fn trailer_from_card(card: ElementRef<'_>) -> TrailerRecord {
    let play = card.select(selector!("a.play_trailer")).next();

    let mut trailer = TrailerRecord {
        title: select_text(card, selector!("h2")),
        details: select_text(card, selector!("h3.sub")),
        site: play.and_then(|a| attr(a, "data-site")),
        channel: select_text(card, selector!("h4")),
        ..TrailerRecord::default()
    };
    if let Some(id) = play.and_then(|a| attr(a, "data-id")) {
        trailer.set_youtube_id(id);
    }
    trailer
}
