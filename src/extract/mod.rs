//! Field extraction over parsed document fragments.
//!
//! Every lookup is partial: a missing element yields `None` and the caller
//! moves on to its next strategy. Nothing in here returns an error.
//!
//! # Architecture
//!
//! - [`FieldStrategy`]: one self-contained attempt at reading a field
//! - [`first_present`]: runs strategies in priority order, first hit wins
//! - [`card`]: strategies for search listing cards (title chain, poster, id)

use scraper::{ElementRef, Selector};

/// Compile a CSS selector once and hand out a `&'static` reference to it.
macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: once_cell::sync::Lazy<scraper::Selector> =
            once_cell::sync::Lazy::new(|| {
                scraper::Selector::parse($css).expect(concat!("invalid selector: ", $css))
            });
        &*SELECTOR
    }};
}
pub(crate) use selector;

pub mod card;

/// One attempt at reading a field from a fragment.
pub type FieldStrategy = for<'a> fn(ElementRef<'a>) -> Option<String>;

/// Try `strategies` in order and return the first value found.
pub fn first_present(fragment: ElementRef<'_>, strategies: &[FieldStrategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy(fragment))
}

/// Trimmed text of an element.
///
/// Each text node is trimmed, empty ones are dropped and the rest are joined
/// with single spaces. `None` when nothing is left.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let mut parts = Vec::new();
    collect_text(element, None, &mut parts);
    join_parts(parts)
}

/// Like [`element_text`], but descendants matching `exclude` contribute nothing.
///
/// Equivalent to removing those sub-elements from the tree before reading
/// the text, without mutating the document.
pub fn text_without(element: ElementRef<'_>, exclude: &Selector) -> Option<String> {
    let mut parts = Vec::new();
    collect_text(element, Some(exclude), &mut parts);
    join_parts(parts)
}

/// Text of the first descendant matching `selector`.
pub fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(element_text)
}

/// Non-empty, trimmed attribute value.
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Attribute of the first descendant matching `selector`.
pub fn select_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    scope.select(selector).next().and_then(|el| attr(el, name))
}

fn collect_text(element: ElementRef<'_>, exclude: Option<&Selector>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if exclude.is_some_and(|sel| sel.matches(&child_element)) {
                continue;
            }
            collect_text(child_element, exclude, out);
        } else if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
    }
}

fn join_parts(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
