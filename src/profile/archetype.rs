use serde::Serialize;
use tracing::debug;

use super::genre_vector::GenreVector;
use super::utils::Rounding;

/// A listener persona from the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeDefinition {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Representative genre keywords, most characteristic first
    pub genres: &'static [&'static str],
}

/// The archetype catalog, in tie-breaking order
pub static ARCHETYPES: [ArchetypeDefinition; 6] = [
    ArchetypeDefinition {
        name: "The Drill Head",
        emoji: "🔩",
        description: "You live in the rhythmic pocket of trap and drill, drawn to raw energy and street narratives.",
        genres: &[
            "drill",
            "uk drill",
            "chicago drill",
            "trap",
            "rap",
            "hip hop",
            "gangster rap",
            "plugg",
            "pluggnb",
            "melodic rap",
            "pain rap",
        ],
    },
    ArchetypeDefinition {
        name: "The Sad Indie Kid",
        emoji: "🌧️",
        description: "Melancholy melodies and introspective lyrics are your comfort zone.",
        genres: &[
            "indie pop",
            "indie rock",
            "dream pop",
            "shoegaze",
            "bedroom pop",
            "lo-fi indie",
            "emo",
            "alternative",
            "slowcore",
            "sadcore",
        ],
    },
    ArchetypeDefinition {
        name: "The Afrobeats Devotee",
        emoji: "🌍",
        description: "The infectious rhythms of Africa and its diaspora move you like nothing else.",
        genres: &[
            "afrobeats",
            "afropop",
            "afroswing",
            "afro soul",
            "highlife",
            "gqom",
            "amapiano",
            "dancehall",
            "reggaeton",
            "afro r&b",
        ],
    },
    ArchetypeDefinition {
        name: "The Pop Maximalist",
        emoji: "✨",
        description: "Hooks, production, and pure feeling. You know a banger when you hear one.",
        genres: &[
            "pop",
            "dance pop",
            "electropop",
            "synth-pop",
            "teen pop",
            "k-pop",
            "j-pop",
            "power pop",
        ],
    },
    ArchetypeDefinition {
        name: "The R&B Romantic",
        emoji: "💜",
        description: "Soul and feeling come first. You gravitate toward intimate vocals and lush production.",
        genres: &[
            "r&b",
            "neo soul",
            "soul",
            "quiet storm",
            "contemporary r&b",
            "alternative r&b",
            "new jack swing",
            "funk",
            "motown",
        ],
    },
    ArchetypeDefinition {
        name: "The Alternative Explorer",
        emoji: "🎸",
        description: "You wander freely through rock, punk, and experimental spaces, always seeking the unexpected.",
        genres: &[
            "alternative rock",
            "post-punk",
            "art rock",
            "math rock",
            "noise rock",
            "experimental",
            "psychedelic rock",
            "prog rock",
        ],
    },
];

/// Returned when there is no genre data to classify
pub static ECLECTIC_WANDERER: ArchetypeDefinition = ArchetypeDefinition {
    name: "The Eclectic Wanderer",
    emoji: "🌀",
    description: "Your taste defies easy categorisation. You roam freely across the entire musical spectrum.",
    genres: &[],
};

/// The archetype that best matches a genre vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeMatch {
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub top_genres: Vec<String>,
    pub confidence: f64, // 0-100
}

impl ArchetypeMatch {
    fn from_definition(definition: &ArchetypeDefinition, genre_count: usize, confidence: f64) -> Self {
        Self {
            name: definition.name.to_string(),
            emoji: definition.emoji.to_string(),
            description: definition.description.to_string(),
            top_genres: definition
                .genres
                .iter()
                .take(genre_count)
                .map(|genre| genre.to_string())
                .collect(),
            confidence,
        }
    }
}

/// Matches genre vectors against the archetype catalog
pub struct ArchetypeClassifier;

impl ArchetypeClassifier {
    /// Weighted overlap between a genre vector and one archetype.
    ///
    /// Exact keyword hits count at full weight. A genre that contains, or is
    /// contained in, a keyword (e.g. "dark trap" and "trap") counts at half
    /// weight, once.
    pub fn archetype_score(vector: &GenreVector, archetype: &ArchetypeDefinition) -> f64 {
        let total = match vector.total_weight() {
            0 => 1,
            total => total,
        };

        let mut score = 0.0;
        for (genre, weight) in vector.iter() {
            if archetype.genres.iter().any(|keyword| *keyword == genre) {
                score += f64::from(weight);
            } else if archetype
                .genres
                .iter()
                .any(|keyword| genre.contains(*keyword) || keyword.contains(genre))
            {
                score += f64::from(weight) * 0.5;
            }
        }

        score / total as f64
    }

    /// Pick the best-matching archetype. Ties go to the earlier catalog entry.
    pub fn classify(vector: &GenreVector, representative_genre_count: usize) -> ArchetypeMatch {
        if vector.is_empty() {
            return ArchetypeMatch::from_definition(&ECLECTIC_WANDERER, 0, 0.0);
        }

        let mut best = &ARCHETYPES[0];
        let mut best_score = f64::NEG_INFINITY;
        for archetype in &ARCHETYPES {
            let score = Self::archetype_score(vector, archetype);
            debug!("Archetype '{}' scored {:.3}", archetype.name, score);
            if score > best_score {
                best = archetype;
                best_score = score;
            }
        }

        let confidence = Rounding::to_decimals((best_score * 100.0).min(100.0), 1);
        ArchetypeMatch::from_definition(best, representative_genre_count, confidence)
    }
}
