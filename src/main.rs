use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod profile;


use crate::config::load_config;
use crate::models::ListeningHistory;
use crate::profile::enrichment::GenreEnrichment;
use crate::profile::{GenreVector, ProfileAggregator, ProfileConfig, ProfileReport, SharedTaste};

#[derive(Parser)]
#[command(name = "listener-profile")]
#[command(about = "Taste analytics for a listener's top artists and tracks")]
#[command(version)]
struct Args {
    /// Path to a profile tuning JSON file (overrides PROFILE_CONFIG)
    #[arg(short = 'c', long = "config", global = true)]
    config_file: Option<String>,

    /// Pretty-print JSON output
    #[arg(short = 'p', long = "pretty", global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full taste profile
    Profile {
        /// Listening history JSON ({"tracks": [...], "top_artists": [...]})
        #[arg(short = 'i', long = "input")]
        input: String,
    },
    /// Score compatibility against another listener's genre vector
    Compatibility {
        /// Listening history JSON
        #[arg(short = 'i', long = "input")]
        input: String,

        /// The other listener's genre vector ({"genre": weight, ...}) or
        /// shared top-genre list ([{"genre", "count", "pct"}, ...]) as JSON
        #[arg(short = 'o', long = "other")]
        other: String,
    },
    /// Print the genre vector, e.g. to share it for a comparison
    Vector {
        /// Listening history JSON
        #[arg(short = 'i', long = "input")]
        input: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from .env
    let config = load_config();

    // Logs go to stderr, stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let profile_config = match args.config_file.as_ref().or(config.profile_config.as_ref()) {
        Some(path) => {
            info!("Loading profile configuration from: {}", path);
            ProfileConfig::load_from_file(path).map_err(|e| {
                anyhow::anyhow!("Failed to load profile configuration '{}': {}", path, e)
            })?
        }
        None => ProfileConfig::default(),
    };
    let aggregator = ProfileAggregator::new(profile_config);

    match args.command {
        Command::Profile { input } => {
            let history = load_history(&input)?;
            let profile = aggregator.build_profile(&history.tracks, &history.top_artists);
            print_json(&ProfileReport::new(profile), args.pretty)
        }
        Command::Compatibility { input, other } => {
            let history = load_history(&input)?;
            let content = std::fs::read_to_string(&other)
                .with_context(|| format!("Failed to read shared taste '{other}'"))?;
            let shared: SharedTaste = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse shared taste '{other}'"))?;
            let score = aggregator.compatibility(&history.tracks, &history.top_artists, &shared);
            print_json(&score, args.pretty)
        }
        Command::Vector { input } => {
            let history = load_history(&input)?;
            let vector = GenreVector::build(&history.top_artists, &history.tracks);
            print_json(&vector, args.pretty)
        }
    }
}

/// Load a history and fill in missing track genres from the top artists
fn load_history(path: &str) -> Result<ListeningHistory> {
    let mut history = ListeningHistory::load_from_file(path)?;
    info!(
        "Loaded {} tracks and {} top artists from {}",
        history.tracks.len(),
        history.top_artists.len(),
        path
    );

    GenreEnrichment::enrich_tracks(&mut history.tracks, &history.top_artists);
    if history.tracks.is_empty() && history.top_artists.is_empty() {
        warn!("Listening history '{}' is empty", path);
    }
    Ok(history)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
