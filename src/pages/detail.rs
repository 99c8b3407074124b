//! Main movie detail page.

use scraper::{ElementRef, Html};

use super::{PageKind, PageScraper};
use crate::error::Result;
use crate::extract::{
    element_text, first_present, select_attr, select_text, selector, FieldStrategy,
};
use crate::model::MovieDetails;

/// Overview paragraph first, the container's own text otherwise.
const OVERVIEW_STRATEGIES: &[FieldStrategy] = &[nested_paragraph, element_text];

/// Linked name first, plain text otherwise.
const PERSON_NAME_STRATEGIES: &[FieldStrategy] = &[nested_link, element_text];

/// Reads title, facts, genres, rating, poster and director.
pub struct DetailScraper;

impl PageScraper for DetailScraper {
    type Output = MovieDetails;

    fn kind(&self) -> PageKind {
        PageKind::Detail
    }

    fn page_url(&self, target: &str) -> String {
        target.to_string()
    }

    fn extract(&self, document: &Html) -> Result<Option<MovieDetails>> {
        let root = document.root_element();

        let details = MovieDetails {
            title: select_text(root, selector!("h2.title")),
            tagline: select_text(root, selector!("h3.tagline")),
            overview: root
                .select(selector!("div.overview"))
                .next()
                .and_then(|el| first_present(el, OVERVIEW_STRATEGIES)),
            release_date: select_text(root, selector!("span.release")),
            runtime: select_text(root, selector!("span.runtime")),
            genres: genres(root),
            rating: select_attr(root, selector!("div.user_score_chart"), "data-percent"),
            poster_url: select_attr(root, selector!("img.poster"), "src"),
            director: director(root),
        };

        Ok((details != MovieDetails::default()).then_some(details))
    }
}

/// Genre names in page order; `Some` as soon as the genres container exists.
fn genres(root: ElementRef<'_>) -> Option<Vec<String>> {
    let container = root.select(selector!("span.genres")).next()?;
    Some(
        container
            .select(selector!("a"))
            .filter_map(element_text)
            .collect(),
    )
}

/// Name of the first crew entry whose job mentions "director".
///
/// The scan stops at that entry even if it carries no readable name.
fn director(root: ElementRef<'_>) -> Option<String> {
    let entry = root.select(selector!("ol.people li.profile")).find(|entry| {
        select_text(*entry, selector!("p.job"))
            .is_some_and(|job| job.to_lowercase().contains("director"))
    })?;

    entry
        .select(selector!("p.name"))
        .next()
        .and_then(|name| first_present(name, PERSON_NAME_STRATEGIES))
}

fn nested_paragraph(container: ElementRef<'_>) -> Option<String> {
    select_text(container, selector!("p"))
}

fn nested_link(container: ElementRef<'_>) -> Option<String> {
    container
        .select(selector!("a"))
        .next()
        .and_then(element_text)
}
