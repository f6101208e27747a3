//! Cosine-similarity compatibility between two listeners.
//!
//! Each side is treated as a sparse vector over the union of their genres;
//! a genre missing on one side contributes zero.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::genre_vector::GenreVector;
use super::model::TopGenre;
use super::utils::Rounding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompatibilityLabel {
    #[serde(rename = "Musical Soulmates")]
    MusicalSoulmates,
    #[serde(rename = "Overlapping Tastes")]
    OverlappingTastes,
    #[serde(rename = "Different but Curious")]
    DifferentButCurious,
    #[serde(rename = "Musical Opposites")]
    MusicalOpposites,
    Incomparable,
}

impl CompatibilityLabel {
    /// Label for a 0-100 score (inclusive lower bounds)
    pub fn for_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::MusicalSoulmates
        } else if score >= 50.0 {
            Self::OverlappingTastes
        } else if score >= 25.0 {
            Self::DifferentButCurious
        } else {
            Self::MusicalOpposites
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MusicalSoulmates => "You're practically listening to the same playlist. Uncanny.",
            Self::OverlappingTastes => {
                "Solid common ground. You'd have a great time sharing music."
            }
            Self::DifferentButCurious => {
                "Your sounds don't fully overlap, but there's interesting crossover."
            }
            Self::MusicalOpposites => {
                "You live on opposite ends of the genre map. That can be a good thing."
            }
            Self::Incomparable => "Not enough genre data to compare.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityScore {
    pub score: f64, // 0-100
    pub label: CompatibilityLabel,
    pub description: String,
}

impl CompatibilityScore {
    fn incomparable() -> Self {
        Self::labelled(0.0, CompatibilityLabel::Incomparable)
    }

    fn from_similarity(similarity: Option<f64>, decimals: usize) -> Self {
        match similarity {
            Some(similarity) => {
                let score = Rounding::to_decimals(similarity * 100.0, decimals);
                Self::labelled(score, CompatibilityLabel::for_score(score))
            }
            None => Self::incomparable(),
        }
    }

    fn labelled(score: f64, label: CompatibilityLabel) -> Self {
        Self {
            score,
            label,
            description: label.description().to_string(),
        }
    }
}

/// Cosine similarity of two weight maps, or `None` when either side has no
/// magnitude or the union of keys is empty
fn cosine(weights_a: &HashMap<&str, f64>, weights_b: &HashMap<&str, f64>) -> Option<f64> {
    let union: BTreeSet<&str> = weights_a.keys().chain(weights_b.keys()).copied().collect();
    if union.is_empty() {
        return None;
    }

    let (mut dot, mut sq_a, mut sq_b) = (0.0, 0.0, 0.0);
    for genre in &union {
        let a = weights_a.get(genre).copied().unwrap_or(0.0);
        let b = weights_b.get(genre).copied().unwrap_or(0.0);
        dot += a * b;
        sq_a += a * a;
        sq_b += b * b;
    }
    let (mag_a, mag_b) = (sq_a.sqrt(), sq_b.sqrt());

    if mag_a == 0.0 || mag_b == 0.0 {
        return None;
    }
    Some(dot / (mag_a * mag_b))
}

fn vector_weights(vector: &GenreVector) -> HashMap<&str, f64> {
    vector
        .iter()
        .map(|(genre, weight)| (genre, f64::from(weight)))
        .collect()
}

fn shared_weights(weights: &BTreeMap<String, i64>) -> HashMap<&str, f64> {
    weights
        .iter()
        .map(|(genre, weight)| (genre.as_str(), *weight as f64))
        .collect()
}

fn pct_weights(genres: &[TopGenre]) -> HashMap<&str, f64> {
    genres
        .iter()
        .map(|genre| (genre.genre.as_str(), genre.pct))
        .collect()
}

/// Compares two genre fingerprints
pub struct CompatibilityScorer;

impl CompatibilityScorer {
    /// Compatibility of two genre vectors, scored 0-100 to one decimal
    pub fn compatibility(vector_a: &GenreVector, vector_b: &GenreVector) -> CompatibilityScore {
        let similarity = cosine(&vector_weights(vector_a), &vector_weights(vector_b));
        CompatibilityScore::from_similarity(similarity, 1)
    }

    /// Compatibility against a mapping shared by another listener. Its
    /// weights are taken as given, including negative ones.
    pub fn compatibility_with_shared(
        vector: &GenreVector,
        shared: &BTreeMap<String, i64>,
    ) -> CompatibilityScore {
        let similarity = cosine(&vector_weights(vector), &shared_weights(shared));
        CompatibilityScore::from_similarity(similarity, 1)
    }

    /// Compatibility of two shared top-genre lists, weighted by their
    /// percentage shares and scored to a whole number
    pub fn compatibility_from_top_genres(
        genres_a: &[TopGenre],
        genres_b: &[TopGenre],
    ) -> CompatibilityScore {
        let similarity = cosine(&pct_weights(genres_a), &pct_weights(genres_b));
        CompatibilityScore::from_similarity(similarity, 0)
    }
}
