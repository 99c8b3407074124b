//! `tmdb-scrape` CLI - search movies and scrape their full details

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tmdb_scrape::output::{
    batch_file_name, details_file_name, render_candidates, render_details, write_json,
};
use tmdb_scrape::{
    load_config, load_config_from, Aggregator, BrowserIdentity, CandidateRecord, ScrapeClient,
    ScrapeConfig,
};

#[derive(Parser)]
#[command(name = "tmdb-scrape")]
#[command(about = "Scrape movie details from The Movie Database website")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pause before each detail or sub-page fetch, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Skip TLS certificate validation
    #[arg(long, global = true)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the movies matching a query
    Search {
        /// Movie title to search for
        query: String,
    },

    /// Scrape the full details of one or all matching movies
    Details {
        /// Movie title to search for
        query: String,

        /// Which search result to scrape (1-based)
        #[arg(
            short,
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u64).range(1..),
            conflicts_with = "all"
        )]
        pick: u64,

        /// Scrape every search result
        #[arg(short, long)]
        all: bool,

        /// Write the JSON result to this file
        #[arg(short, long, conflicts_with = "save")]
        out: Option<PathBuf>,

        /// Write the JSON result under its default file name
        #[arg(short, long)]
        save: bool,

        /// Print JSON instead of the readable listing
        #[arg(long)]
        json: bool,
    },

    /// Show browser identities drawn from the user agent pool
    Identity {
        /// Number of identities to generate
        #[arg(short, long, default_value = "3")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = build_config(&cli)?;

    match cli.command {
        Commands::Search { query } => {
            cmd_search(&config, &query).await?;
        }
        Commands::Details { query, pick, all, out, save, json } => {
            let sink = match (out, save) {
                (Some(path), _) => Sink::Path(path),
                (None, true) => Sink::DefaultName,
                (None, false) => Sink::None,
            };
            if all {
                cmd_details_all(&config, &query, &sink, json).await?;
            } else {
                cmd_details(&config, &query, pick, &sink, json).await?;
            }
        }
        Commands::Identity { count } => {
            cmd_identity(&config, count);
        }
    }

    Ok(())
}

/// Where a details run writes its JSON.
enum Sink {
    None,
    DefaultName,
    Path(PathBuf),
}

impl Sink {
    fn resolve(&self, default_name: impl FnOnce() -> PathBuf) -> Option<PathBuf> {
        match self {
            Self::None => None,
            Self::DefaultName => Some(default_name()),
            Self::Path(path) => Some(path.clone()),
        }
    }
}

/// The saved file is named after the title the user picked from the listing.
fn details_sink_path(sink: &Sink, candidate: &CandidateRecord) -> Option<PathBuf> {
    sink.resolve(|| details_file_name(&candidate.title))
}

fn build_config(cli: &Cli) -> Result<ScrapeConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(delay) = cli.delay_ms {
        config.request_delay_ms = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.insecure {
        config.accept_invalid_certs = true;
    }
    Ok(config)
}

fn aggregator(config: &ScrapeConfig) -> Result<Aggregator<ScrapeClient>> {
    let client = ScrapeClient::new(config).context("failed to build HTTP client")?;
    Ok(Aggregator::new(client, config))
}

async fn cmd_search(config: &ScrapeConfig, query: &str) -> Result<()> {
    let candidates = aggregator(config)?.search(query).await?;
    if candidates.is_empty() {
        println!("No movies found!");
    } else {
        print!("{}", render_candidates(&candidates));
    }
    Ok(())
}

async fn cmd_details(
    config: &ScrapeConfig,
    query: &str,
    pick: u64,
    sink: &Sink,
    json: bool,
) -> Result<()> {
    let aggregator = aggregator(config)?;
    let candidates = aggregator.search(query).await?;
    if candidates.is_empty() {
        println!("No movies found!");
        return Ok(());
    }

    let Some(candidate) = usize::try_from(pick - 1).ok().and_then(|i| candidates.get(i)) else {
        println!("Invalid selection.");
        return Ok(());
    };

    eprintln!("Scraping details for: {}", candidate.title);
    let record = aggregator.aggregate(candidate).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", render_details(&record));
    }

    if let Some(path) = details_sink_path(sink, candidate) {
        write_json(&path, &record)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved details to {}", path.display());
    }
    Ok(())
}

async fn cmd_details_all(
    config: &ScrapeConfig,
    query: &str,
    sink: &Sink,
    json: bool,
) -> Result<()> {
    let aggregator = aggregator(config)?;
    let candidates = aggregator.search(query).await?;
    if candidates.is_empty() {
        println!("No movies found!");
        return Ok(());
    }

    let records = aggregator.aggregate_all(&candidates).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", render_details(record));
        }
    }

    if let Some(path) = sink.resolve(|| batch_file_name(query)) {
        write_json(&path, records.as_slice())
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved {} records to {}", records.len(), path.display());
    }
    Ok(())
}

fn cmd_identity(config: &ScrapeConfig, count: usize) {
    println!("Generating {count} browser identities:\n");

    for i in 0..count {
        let identity = BrowserIdentity::from_config(config);
        println!("Identity {}:", i + 1);
        println!("   UA: {}", identity.user_agent);
        println!("   Accept-Language: {}", identity.accept_language);
        println!("   Referer: {}", identity.referer);
        println!();
    }
}
