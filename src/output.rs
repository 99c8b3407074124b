//! Record output: JSON files and a readable listing.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::{CandidateRecord, DetailRecord};

/// Default file for a single movie, e.g. `tmdb_The_Matrix_details.json`.
pub fn details_file_name(title: &str) -> PathBuf {
    PathBuf::from(format!("tmdb_{}_details.json", file_stem(title)))
}

/// Default file for a batch run, named after the search query.
pub fn batch_file_name(query: &str) -> PathBuf {
    PathBuf::from(format!("tmdb_{}_detailed_results.json", file_stem(query)))
}

/// Spaces become underscores; path separators are dropped.
fn file_stem(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Write `value` as pretty, UTF-8 JSON. Non-ASCII text is kept as is.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// One line per candidate: `N. Title (release date)`.
pub fn render_candidates(candidates: &[CandidateRecord]) -> String {
    CandidateListing(candidates).to_string()
}

/// Human-readable listing of a merged record.
pub fn render_details(record: &DetailRecord) -> String {
    DetailListing(record).to_string()
}

struct CandidateListing<'a>(&'a [CandidateRecord]);

impl fmt::Display for CandidateListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_candidates(f, self.0)
    }
}

struct DetailListing<'a>(&'a DetailRecord);

impl fmt::Display for DetailListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_details(f, self.0)
    }
}

fn write_candidates(out: &mut impl fmt::Write, candidates: &[CandidateRecord]) -> fmt::Result {
    for (i, movie) in candidates.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({})",
            i + 1,
            movie.title,
            or_na(movie.release_date.as_deref())
        )?;
    }
    Ok(())
}

fn write_details(out: &mut impl fmt::Write, record: &DetailRecord) -> fmt::Result {
    let movie = &record.candidate;

    field(out, "Title", Some(&movie.title))?;
    field(out, "Alternative Title", movie.alternative_title.as_ref())?;
    field(out, "Url", movie.detail_url.as_ref())?;
    field(out, "Release Date", movie.release_date.as_ref())?;
    field(out, "Overview", movie.overview.as_ref())?;
    field(out, "Poster Url", movie.poster_url.as_ref())?;
    field(out, "Media Type", movie.media_type.as_ref())?;
    field(out, "Adult Content", movie.is_adult.as_ref())?;
    field(out, "Tmdb Id", movie.external_id.as_ref())?;
    field(out, "Tagline", record.tagline.as_ref())?;
    field(out, "Runtime", record.runtime.as_ref())?;
    if let Some(genres) = &record.genres {
        writeln!(out, "Genres: {}", genres.join(", "))?;
    }
    field(out, "Rating", record.rating.as_ref())?;
    field(out, "Director", record.director.as_ref())?;

    url_list(out, "Logos", record.logo_urls.as_deref())?;
    url_list(out, "Backdrops", record.backdrop_urls.as_deref())?;
    url_list(out, "Additional Posters", record.additional_poster_urls.as_deref())?;

    if let Some(trailers) = &record.trailers {
        writeln!(out, "Trailers:")?;
        for (i, trailer) in trailers.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, or_na(trailer.title.as_deref()))?;
            writeln!(out, "     YouTube ID: {}", or_na(trailer.youtube_id.as_deref()))?;
            writeln!(out, "     YouTube URL: {}", or_na(trailer.youtube_url.as_deref()))?;
            writeln!(out, "     Details: {}", or_na(trailer.details.as_deref()))?;
            writeln!(out, "     Site: {}", or_na(trailer.site.as_deref()))?;
            if let Some(channel) = &trailer.channel {
                writeln!(out, "     Channel: {channel}")?;
            }
        }
    }

    if let Some(cast) = &record.cast {
        writeln!(out, "Cast:")?;
        for (i, member) in cast.iter().enumerate() {
            let character = or_na(member.character.as_deref());
            writeln!(out, "  {}. {} as {character}", i + 1, member.name)?;
            if let Some(profile) = &member.profile_image_url {
                writeln!(out, "     Profile: {profile}")?;
            }
        }
    }

    Ok(())
}

fn field<T: fmt::Display>(
    out: &mut impl fmt::Write,
    label: &str,
    value: Option<&T>,
) -> fmt::Result {
    match value {
        Some(value) => writeln!(out, "{label}: {value}"),
        None => Ok(()),
    }
}

fn url_list(out: &mut impl fmt::Write, label: &str, urls: Option<&[String]>) -> fmt::Result {
    let Some(urls) = urls else {
        return Ok(());
    };
    writeln!(out, "{label}:")?;
    for (i, url) in urls.iter().enumerate() {
        writeln!(out, "  {}. {url}", i + 1)?;
    }
    Ok(())
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}
