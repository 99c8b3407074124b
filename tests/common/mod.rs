//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use tmdb_scrape::{PageFetcher, Result, ScrapeConfig, ScrapeError};

pub const SITE: &str = "https://tmdb.test";
pub const HEAT_URL: &str = "https://tmdb.test/movie/949-heat";
pub const HEAT_2_URL: &str = "https://tmdb.test/movie/1184-heat";

/// Serves pages from memory and records every requested URL with the time
/// the request was made.
///
/// URLs with no page answer 404.
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<(String, Instant)>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push((url.to_string(), Instant::now()));
        self.pages.get(url).cloned().ok_or_else(|| ScrapeError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Test config: fixture site root, no pacing.
pub fn config() -> ScrapeConfig {
    ScrapeConfig {
        base_url: SITE.to_string(),
        request_delay_ms: 0,
        ..ScrapeConfig::default()
    }
}

pub const SEARCH_HEAT: &str = r#"
<html><body>
<div class="search_results movie">
  <div class="card v4 tight">
    <div class="image">
      <a class="result" data-media-type="movie" data-media-adult="false" href="/movie/949-heat">
        <img class="poster" alt="Heat" src="https://media.tmdb.test/t/p/w94_and_h141_bestv2/heat.jpg">
      </a>
    </div>
    <div class="details">
      <a class="result" data-media-type="movie" href="/movie/949-heat"><h2>Heat</h2></a>
      <span class="release_date">December 15, 1995</span>
      <div class="overview"><p>Search listing blurb.</p></div>
    </div>
  </div>
  <div class="card v4 tight">
    <div class="details"><h2>Heat Wave</h2></div>
  </div>
  <div class="card v4 tight">
    <div class="details">
      <a class="result" data-media-type="movie" href="/movie/1184-heat"><h2>Heat</h2></a>
      <span class="release_date">June 5, 1986</span>
    </div>
  </div>
</div>
</body></html>"#;

pub const SEARCH_EMPTY: &str = r#"<html><body><div class="search_results movie"><p>There are no movies that matched your query.</p></div></body></html>"#;

pub const HEAT_DETAIL: &str = r#"
<html><body>
<section class="header poster">
  <img class="poster" src="https://media.tmdb.test/t/p/w300_and_h450_bestv2/heat.jpg">
  <h2 class="title"><a href="/movie/949-heat">Heat</a></h2>
  <div class="facts">
    <span class="release">12/15/1995 (US)</span>
    <span class="genres"><a href="/genre/28">Action</a>, <a href="/genre/80">Crime</a>, <a href="/genre/18">Drama</a></span>
    <span class="runtime">2h 50m</span>
  </div>
  <div class="user_score_chart" data-percent="79.0"></div>
  <h3 class="tagline">A Los Angeles crime saga</h3>
  <div class="overview"><p>Obsessive master thief Neil McCauley leads a top-notch crew.</p></div>
  <ol class="people no_image">
    <li class="profile"><p class="name"><a href="/person/1">Art Linson</a></p><p class="character job">Producer</p></li>
    <li class="profile"><p class="name"><a href="/person/2">Michael Mann</a></p><p class="character job">Director, Screenplay</p></li>
  </ol>
</section>
</body></html>"#;

pub const HEAT_LOGOS: &str = r#"
<html><body><section class="panel user_images">
  <img src="https://media.tmdb.test/t/p/w500/logo-en.png">
  <img src="https://media.tmdb.test/t/p/w500/logo-de.png">
</section></body></html>"#;

pub const REDESIGNED: &str = r#"<html><body><main class="grid"><img src="https://media.tmdb.test/t/p/w220_and_h330_face/p.jpg"></main></body></html>"#;

pub const HEAT_TRAILERS: &str = r#"
<html><body><section class="panel video">
  <div class="video card default">
    <a class="play_trailer" data-site="YouTube" data-id="14oNcFxiVaQ"></a>
    <h2>Official Trailer</h2>
    <h3 class="sub">2:31</h3>
  </div>
</section></body></html>"#;

pub fn cast_page(names: &[&str]) -> String {
    let entries: String = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"<li data-order="{i}"><img class="profile" src="https://media.tmdb.test/t/p/w66/{i}.jpg"><div class="info"><p><a href="/person/{i}">{name}</a></p><p class="character">Role {i}</p></div></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><section class="panel pad"><ol class="people credits">{entries}</ol></section></body></html>"#
    )
}

pub fn sub_page(movie: &str, path: &str) -> String {
    format!("{movie}{path}")
}
