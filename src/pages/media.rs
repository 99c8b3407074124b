//! Logo, backdrop and poster galleries.
//!
//! All three pages share one layout: a `user_images` panel full of
//! thumbnails. Each gallery keeps only the rendition size it cares about.

use scraper::{Html, Selector};

use super::{panel, sub_page_url, PageKind, PageScraper};
use crate::error::Result;
use crate::extract::{attr, selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Logos,
    Backdrops,
    Posters,
}

impl MediaKind {
    pub const ALL: [Self; 3] = [Self::Logos, Self::Backdrops, Self::Posters];

    fn path(self) -> &'static str {
        match self {
            Self::Logos => "/images/logos",
            Self::Backdrops => "/images/backdrops",
            Self::Posters => "/images/posters",
        }
    }

    /// Rendition size that marks a gallery image of this kind.
    pub fn size_token(self) -> &'static str {
        match self {
            Self::Logos => "w500",
            Self::Backdrops => "w500_and_h282_face",
            Self::Posters => "w220_and_h330_face",
        }
    }

    fn images(self) -> &'static Selector {
        match self {
            Self::Logos => selector!(r#"img[src*="w500"]"#),
            Self::Backdrops => selector!(r#"img[src*="w500_and_h282_face"]"#),
            Self::Posters => selector!(r#"img[src*="w220_and_h330_face"]"#),
        }
    }

    pub fn page_kind(self) -> PageKind {
        match self {
            Self::Logos => PageKind::Logos,
            Self::Backdrops => PageKind::Backdrops,
            Self::Posters => PageKind::Posters,
        }
    }
}

/// Collects image URLs of one gallery, in page order, duplicates kept.
pub struct MediaScraper {
    kind: MediaKind,
}

impl MediaScraper {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }
}

impl PageScraper for MediaScraper {
    type Output = Vec<String>;

    fn kind(&self) -> PageKind {
        self.kind.page_kind()
    }

    fn page_url(&self, target: &str) -> String {
        sub_page_url(target, self.kind.path())
    }

    fn extract(&self, document: &Html) -> Result<Option<Vec<String>>> {
        let panel = panel!(document, self.kind(), "section.panel.user_images")?;

        let urls: Vec<String> = panel
            .select(self.kind.images())
            .filter_map(|img| attr(img, "src"))
            .collect();

        Ok((!urls.is_empty()).then_some(urls))
    }
}
