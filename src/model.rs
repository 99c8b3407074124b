//! Movie records produced by the scrapers.
//!
//! Absent fields are skipped on output, so a record serializes to exactly
//! the keys that were found on the site.

use serde::{Deserialize, Serialize};

/// One entry from a search-results listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Never empty; `"Unknown Title"` when nothing better was found.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_title: Option<String>,
    /// Absolute detail page URL. Without it no sub-page can be scraped.
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "adult_content", skip_serializing_if = "Option::is_none")]
    pub is_adult: Option<bool>,
    #[serde(rename = "tmdb_id", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Fields read from a movie's main detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDetails {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    /// `Some` whenever the genres container exists, even if it lists nothing.
    pub genres: Option<Vec<String>>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub director: Option<String>,
}

/// One trailer card from the videos page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl TrailerRecord {
    /// Build the canonical watch URL for a video identifier.
    pub fn watch_url(youtube_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={youtube_id}")
    }

    /// Set the identifier and derive the watch URL from it.
    pub fn set_youtube_id(&mut self, id: String) {
        self.youtube_url = Some(Self::watch_url(&id));
        self.youtube_id = Some(id);
    }

    pub fn is_empty(&self) -> bool {
        self.youtube_id.is_none()
            && self.youtube_url.is_none()
            && self.title.is_none()
            && self.details.is_none()
            && self.site.is_none()
            && self.channel.is_none()
    }
}

/// One billed cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(rename = "profile_url", skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// The merged record for one movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_poster_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailers: Option<Vec<TrailerRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
}

impl DetailRecord {
    /// Start a record from the search listing entry.
    pub fn from_candidate(candidate: &CandidateRecord) -> Self {
        Self {
            candidate: candidate.clone(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.candidate.title
    }

    /// Overlay detail page fields. Present values win, absent ones keep
    /// whatever the candidate carried.
    pub fn apply_details(&mut self, details: MovieDetails) {
        let MovieDetails {
            title,
            tagline,
            overview,
            release_date,
            runtime,
            genres,
            rating,
            poster_url,
            director,
        } = details;

        if let Some(title) = title {
            self.candidate.title = title;
        }
        override_with(&mut self.candidate.overview, overview);
        override_with(&mut self.candidate.release_date, release_date);
        override_with(&mut self.candidate.poster_url, poster_url);
        override_with(&mut self.tagline, tagline);
        override_with(&mut self.runtime, runtime);
        override_with(&mut self.genres, genres);
        override_with(&mut self.rating, rating);
        override_with(&mut self.director, director);
    }

    pub fn attach_logos(&mut self, urls: Vec<String>) {
        attach(&mut self.logo_urls, urls);
    }

    pub fn attach_backdrops(&mut self, urls: Vec<String>) {
        attach(&mut self.backdrop_urls, urls);
    }

    pub fn attach_posters(&mut self, urls: Vec<String>) {
        attach(&mut self.additional_poster_urls, urls);
    }

    pub fn attach_trailers(&mut self, trailers: Vec<TrailerRecord>) {
        attach(&mut self.trailers, trailers);
    }

    pub fn attach_cast(&mut self, cast: Vec<CastMember>) {
        attach(&mut self.cast, cast);
    }
}

fn override_with<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Empty collections leave the field absent.
fn attach<T>(slot: &mut Option<Vec<T>>, items: Vec<T>) {
    if !items.is_empty() {
        *slot = Some(items);
    }
}
