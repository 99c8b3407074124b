//! Strategies for search listing cards.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::{attr, first_present, select_attr, select_text, selector, text_without, FieldStrategy};

/// Title reported when every strategy comes up empty.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Listing thumbnails that have a larger rendition on the image CDN.
const LOW_RES_POSTER_TOKENS: &[&str] = &["w94_and_h141_bestv2", "w130_and_h195_bestv2"];
const HIGH_RES_POSTER_TOKEN: &str = "w220_and_h330_face";

static MOVIE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"/movie/(\d+)").expect("valid regex"));

/// Title strategies in priority order.
const TITLE_STRATEGIES: &[FieldStrategy] = &[
    heading_title,
    result_anchor_title,
    poster_alt_title,
    detail_path_title,
];

/// Best available title for a card.
///
/// Falls back to [`UNKNOWN_TITLE`]; never fails.
pub fn card_title(card: ElementRef<'_>) -> String {
    first_present(card, TITLE_STRATEGIES).unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Alternative (usually original-language) title, if the card marks one.
pub fn alternative_title(card: ElementRef<'_>) -> Option<String> {
    select_text(card, selector!("span.title"))
}

/// The card's link to the movie detail page, as written in the markup.
pub fn detail_href(card: ElementRef<'_>) -> Option<String> {
    select_attr(card, selector!("a.result"), "href")
}

/// Poster thumbnail URL, upgraded to the larger rendition when possible.
pub fn poster_url(card: ElementRef<'_>) -> Option<String> {
    select_attr(card, selector!("img.poster"), "src")
        .map(|src| normalize_poster_url(&src).into_owned())
}

/// Substitute a known low-resolution size token with the high-resolution one.
///
/// Any other URL, including an already upgraded one, passes through unchanged.
pub fn normalize_poster_url(url: &str) -> Cow<'_, str> {
    LOW_RES_POSTER_TOKENS
        .iter()
        .find(|token| url.contains(*token))
        .map_or(Cow::Borrowed(url), |token| {
            Cow::Owned(url.replace(token, HIGH_RES_POSTER_TOKEN))
        })
}

/// Numeric movie identifier from a `/movie/<id>-slug` path.
pub fn movie_id(href: &str) -> Option<String> {
    MOVIE_ID
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Readable title from a `/movie/<id>-some-slug` path.
///
/// Drops the numeric id prefix, turns hyphens into spaces and title-cases
/// every word.
pub fn title_from_path(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    if path.split('/').count() <= 2 {
        return None;
    }

    let slug = path.rsplit('/').next()?;
    let slug = match slug.split_once('-') {
        Some((id, rest)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => rest,
        _ => slug,
    };

    let words = slug.replace('-', " ");
    let words = words.trim();
    if words.is_empty() {
        None
    } else {
        Some(title_case(words))
    }
}

fn heading_title(card: ElementRef<'_>) -> Option<String> {
    card.select(selector!("h2"))
        .next()
        .and_then(|h2| text_without(h2, selector!("span.title")))
}

fn result_anchor_title(card: ElementRef<'_>) -> Option<String> {
    card.select(selector!("a.result"))
        .next()
        .and_then(|a| text_without(a, selector!("span.title")))
}

fn poster_alt_title(card: ElementRef<'_>) -> Option<String> {
    card.select(selector!("img.poster"))
        .next()
        .and_then(|img| attr(img, "alt"))
}

fn detail_path_title(card: ElementRef<'_>) -> Option<String> {
    detail_href(card).and_then(|href| title_from_path(&href))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn with_card<T>(html: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let doc = Html::parse_fragment(html);
        let card = doc.select(selector!("div.card")).next().unwrap();
        f(card)
    }

    #[test]
    fn heading_title_strips_alternative_title() {
        let html = r#"<div class="card"><h2>Amélie <span class="title">(Le Fabuleux Destin)</span></h2></div>"#;
        with_card(html, |card| {
            assert_eq!(card_title(card), "Amélie");
            assert_eq!(alternative_title(card).as_deref(), Some("(Le Fabuleux Destin)"));
        });
    }

    #[test]
    fn anchor_title_when_heading_missing() {
        let html = r#"<div class="card"><a class="result" href="/movie/1-x">Heat<span class="title">Alt</span></a></div>"#;
        with_card(html, |card| assert_eq!(card_title(card), "Heat"));
    }

    #[test]
    fn empty_heading_falls_through() {
        let html = r#"<div class="card"><h2> <span class="title">Only Alt</span></h2><img class="poster" alt="Ronin"></div>"#;
        with_card(html, |card| assert_eq!(card_title(card), "Ronin"));
    }

    #[test]
    fn path_title_when_no_text_or_alt() {
        let html = r#"<div class="card"><a class="result" href="/movie/1035259-the-naked-gun"><img class="poster" src="x.jpg"></a></div>"#;
        with_card(html, |card| assert_eq!(card_title(card), "The Naked Gun"));
    }

    #[test]
    fn unknown_title_when_everything_is_missing() {
        with_card(r#"<div class="card"><p>nothing useful</p></div>"#, |card| {
            assert_eq!(card_title(card), UNKNOWN_TITLE);
            assert_eq!(alternative_title(card), None);
            assert_eq!(poster_url(card), None);
            assert_eq!(detail_href(card), None);
        });
    }

    #[test]
    fn title_from_path_variants() {
        assert_eq!(title_from_path("/movie/603-the-matrix").as_deref(), Some("The Matrix"));
        assert_eq!(title_from_path("/movie/the-matrix").as_deref(), Some("The Matrix"));
        assert_eq!(
            title_from_path("/movie/11-star-wars?language=en").as_deref(),
            Some("Star Wars")
        );
        assert_eq!(title_from_path("/movie/42").as_deref(), Some("42"));
        assert_eq!(title_from_path("/movie/"), None);
        assert_eq!(title_from_path("matrix"), None);
        assert_eq!(title_from_path("/matrix"), None);
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("the naked gun 2½"), "The Naked Gun 2½");
        assert_eq!(title_case("WALL e"), "Wall E");
        assert_eq!(title_case("o'brien"), "O'Brien");
    }

    #[test]
    fn poster_tokens_are_upgraded() {
        let small = "https://image.tmdb.org/t/p/w94_and_h141_bestv2/abc.jpg";
        let medium = "https://image.tmdb.org/t/p/w130_and_h195_bestv2/abc.jpg";
        let expected = "https://image.tmdb.org/t/p/w220_and_h330_face/abc.jpg";
        assert_eq!(normalize_poster_url(small), expected);
        assert_eq!(normalize_poster_url(medium), expected);
    }

    #[test]
    fn poster_normalization_is_idempotent() {
        let urls = [
            "https://image.tmdb.org/t/p/w94_and_h141_bestv2/abc.jpg",
            "https://image.tmdb.org/t/p/w220_and_h330_face/abc.jpg",
            "https://image.tmdb.org/t/p/original/abc.jpg",
        ];
        for url in urls {
            let once = normalize_poster_url(url).into_owned();
            assert_eq!(normalize_poster_url(&once), once);
        }
        assert!(matches!(
            normalize_poster_url("https://image.tmdb.org/t/p/original/abc.jpg"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn card_poster_is_normalized() {
        let html = r#"<div class="card"><img class="poster" src="/t/p/w94_and_h141_bestv2/a.jpg"></div>"#;
        with_card(html, |card| {
            assert_eq!(poster_url(card).as_deref(), Some("/t/p/w220_and_h330_face/a.jpg"));
        });
    }

    #[test]
    fn movie_id_from_path() {
        assert_eq!(movie_id("/movie/1035259-the-naked-gun").as_deref(), Some("1035259"));
        assert_eq!(
            movie_id("https://www.themoviedb.org/movie/603").as_deref(),
            Some("603")
        );
        assert_eq!(movie_id("/tv/1399-game-of-thrones"), None);
        assert_eq!(movie_id("/movie/abc"), None);
    }
}
