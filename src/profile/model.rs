use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::archetype::ArchetypeMatch;
use super::scoring::{DiversityScore, EraAnalysis, MainstreamScore};
use super::taste_map::TasteMapPoint;

/// A genre's share of the listener's total genre weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGenre {
    pub genre: String,
    pub count: u32, // Accumulated weight
    pub pct: f64,   // Share of total weight, one decimal
}

/// Everything derived from one listening history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub archetype: ArchetypeMatch,
    pub mainstream: MainstreamScore,
    pub era: EraAnalysis,
    pub diversity: DiversityScore,
    pub top_genres: Vec<TopGenre>,
    pub taste_map: Vec<TasteMapPoint>,
}

/// Envelope written by the `profile` subcommand
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub generated_at: DateTime<Utc>,
    pub profile: Profile,
}

impl ProfileReport {
    pub fn new(profile: Profile) -> Self {
        Self {
            generated_at: Utc::now(),
            profile,
        }
    }
}

/// What another listener shares for a comparison: either a genre weight
/// mapping (any integer weights) or the top-genre list of a shared profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SharedTaste {
    Weights(BTreeMap<String, i64>),
    TopGenres(Vec<TopGenre>),
}
