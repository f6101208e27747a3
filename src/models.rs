use serde::{Deserialize, Serialize};

/// A top track as supplied by the upstream data pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>, // Display names of the credited artists
    pub artist_ids: Vec<String>, // Used for genre enrichment when `genres` is empty
    pub album: String,
    pub release_date: String, // May be partial, e.g. "1997" or "1997-06"
    pub popularity: u32,      // 0-100, 0 means unknown
    pub explicit: bool,
    pub preview_url: Option<String>,
    pub image: Option<String>,
    pub genres: Vec<String>,
}

/// A top artist as supplied by the upstream data pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub image: Option<String>,
}

/// The listening history document consumed by every subcommand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListeningHistory {
    pub tracks: Vec<Track>,
    pub top_artists: Vec<Artist>,
}

impl ListeningHistory {
    /// Load a listening history from a JSON file
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listening history '{path}'"))?;
        let history: ListeningHistory = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse listening history '{path}'"))?;
        Ok(history)
    }
}

impl Track {
    /// Whether this track reports a usable popularity value
    pub fn has_popularity(&self) -> bool {
        self.popularity > 0
    }
}

impl Artist {
    /// Whether this artist carries at least one genre tag
    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }
}
