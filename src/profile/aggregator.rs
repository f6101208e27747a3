use tracing::info;

use super::archetype::ArchetypeClassifier;
use super::compatibility::{CompatibilityScore, CompatibilityScorer};
use super::genre_vector::GenreVector;
use super::model::{Profile, SharedTaste, TopGenre};
use super::scoring::ScoreCalculators;
use super::taste_map::TasteMapProjector;
use super::utils::Rounding;
use super::ProfileConfig;
use crate::models::{Artist, Track};

/// Main profile builder
pub struct ProfileAggregator {
    config: ProfileConfig,
}

impl ProfileAggregator {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Build the full taste profile for one listener
    pub fn build_profile(&self, tracks: &[Track], artists: &[Artist]) -> Profile {
        let vector = GenreVector::build(artists, tracks);
        info!(
            "Built genre vector: {} genres, total weight {}",
            vector.len(),
            vector.total_weight()
        );

        let archetype =
            ArchetypeClassifier::classify(&vector, self.config.representative_genre_count);
        info!(
            "Matched archetype '{}' ({:.1}% confidence)",
            archetype.name, archetype.confidence
        );

        let era = ScoreCalculators::era_analysis(tracks);
        if era.distribution.is_empty() {
            info!("No dated tracks, era left unknown");
        } else {
            info!(
                "Dominant era {} ({}% of dated tracks across {} decades)",
                era.dominant_decade,
                era.distribution.get(&era.dominant_decade).unwrap_or(0),
                era.distribution.len()
            );
        }

        Profile {
            archetype,
            mainstream: ScoreCalculators::mainstream_score(tracks),
            era,
            diversity: ScoreCalculators::diversity_score(&vector, self.config.breadth_saturation),
            top_genres: Self::top_genres(&vector, self.config.top_genre_limit),
            taste_map: TasteMapProjector::new(self.config.taste_map_genre_count).project(artists),
        }
    }

    /// The heaviest genres with their share of the total weight
    pub fn top_genres(vector: &GenreVector, limit: usize) -> Vec<TopGenre> {
        let total = match vector.total_weight() {
            0 => 1,
            total => total,
        };

        vector
            .top(limit)
            .map(|(genre, count)| TopGenre {
                genre: genre.to_string(),
                count,
                pct: Rounding::to_decimals(f64::from(count) / total as f64 * 100.0, 1),
            })
            .collect()
    }

    /// Compare this listener's history against what another listener shared
    pub fn compatibility(
        &self,
        tracks: &[Track],
        artists: &[Artist],
        other: &SharedTaste,
    ) -> CompatibilityScore {
        let vector = GenreVector::build(artists, tracks);
        let score = match other {
            SharedTaste::Weights(weights) => {
                CompatibilityScorer::compatibility_with_shared(&vector, weights)
            }
            SharedTaste::TopGenres(other_genres) => {
                let mine = Self::top_genres(&vector, self.config.top_genre_limit);
                CompatibilityScorer::compatibility_from_top_genres(&mine, other_genres)
            }
        };
        info!("Compatibility {:.1} ({:?})", score.score, score.label);
        score
    }
}
