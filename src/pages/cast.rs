//! Cast list.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::{panel, sub_page_url, PageKind, PageScraper};
use crate::error::Result;
use crate::extract::{element_text, select_attr, select_text, selector};
use crate::model::CastMember;

/// Only the top-billed members are kept.
pub const CAST_LIMIT: usize = 6;

pub struct CastScraper;

impl PageScraper for CastScraper {
    type Output = Vec<CastMember>;

    fn kind(&self) -> PageKind {
        PageKind::Cast
    }

    fn page_url(&self, target: &str) -> String {
        sub_page_url(target, "/cast")
    }

    fn extract(&self, document: &Html) -> Result<Option<Vec<CastMember>>> {
        let panel = panel!(document, PageKind::Cast, "section.panel.pad")?;

        // nameless entries don't count towards the limit
        let cast: Vec<CastMember> = panel
            .select(selector!("li[data-order]"))
            .enumerate()
            .filter_map(|(position, entry)| {
                let member = cast_member(entry);
                if member.is_none() {
                    debug!(position, "No name found for cast member");
                }
                member
            })
            .take(CAST_LIMIT)
            .collect();

        Ok((!cast.is_empty()).then_some(cast))
    }
}

fn cast_member(entry: ElementRef<'_>) -> Option<CastMember> {
    Some(CastMember {
        name: member_name(entry)?,
        character: select_text(entry, selector!("p.character")),
        profile_image_url: select_attr(entry, selector!("img.profile"), "src"),
    })
}

/// Link text of the first paragraph in the entry's info block.
fn member_name(entry: ElementRef<'_>) -> Option<String> {
    let info = entry.select(selector!("div.info")).next()?;
    let paragraph = info.select(selector!("p")).next()?;
    let link = paragraph.select(selector!("a")).next()?;
    element_text(link)
}
