use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::genre_vector::GenreVector;
use super::utils::Rounding;
use crate::models::Track;

/// How close a listener sits to the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MainstreamLabel {
    Mainstream,
    Mixed,
    Underground,
    Unknown,
}

impl MainstreamLabel {
    /// Label for an average popularity (inclusive lower bounds)
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::Mainstream
        } else if score >= 45.0 {
            Self::Mixed
        } else {
            Self::Underground
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Mainstream => "You're tuned into what the world is listening to right now.",
            Self::Mixed => "A blend of charting hits and deeper cuts. You know both worlds.",
            Self::Underground => {
                "You're ahead of the curve. Most of your picks fly under the radar."
            }
            Self::Unknown => "Not enough popularity data.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainstreamScore {
    pub score: f64, // Average popularity, 0-100
    pub label: MainstreamLabel,
    pub description: String,
}

/// How spread out a listener's genres are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiversityLabel {
    Eclectic,
    Balanced,
    Focused,
    Unknown,
}

impl DiversityLabel {
    pub fn for_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::Eclectic
        } else if score >= 0.4 {
            Self::Balanced
        } else {
            Self::Focused
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Eclectic => "You roam widely. No single genre owns you.",
            Self::Balanced => "A solid core sound with meaningful detours elsewhere.",
            Self::Focused => "You know what you like and you stick to it.",
            Self::Unknown => "No genre data available.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiversityScore {
    pub score: f64, // 0.0-1.0
    pub label: DiversityLabel,
    pub description: String,
}

/// Percentage of dated tracks per decade, in ascending decade order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecadeDistribution(Vec<(u32, u32)>);

impl DecadeDistribution {
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().copied()
    }

    /// Percentage for a decade label such as "1990s"
    pub fn get(&self, label: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(decade, _)| decade_label(*decade) == label)
            .map(|(_, pct)| *pct)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DecadeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (decade, pct) in self.iter() {
            map.serialize_entry(&decade_label(decade), &pct)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraAnalysis {
    pub dominant_decade: String,
    pub distribution: DecadeDistribution,
    pub description: String,
}

fn decade_label(decade: u32) -> String {
    format!("{decade}s")
}

/// Popularity, era and diversity calculators
pub struct ScoreCalculators;

impl ScoreCalculators {
    /// Average popularity of the tracks that report one
    pub fn mainstream_score(tracks: &[Track]) -> MainstreamScore {
        let popularities: Vec<u32> = tracks
            .iter()
            .filter(|track| track.has_popularity())
            .map(|track| track.popularity)
            .collect();

        if popularities.is_empty() {
            let label = MainstreamLabel::Unknown;
            return MainstreamScore {
                score: 0.0,
                label,
                description: label.description().to_string(),
            };
        }

        let sum: u64 = popularities.iter().map(|&p| u64::from(p)).sum();
        let score = Rounding::to_decimals(sum as f64 / popularities.len() as f64, 1);
        let label = MainstreamLabel::for_score(score);

        MainstreamScore {
            score,
            label,
            description: label.description().to_string(),
        }
    }

    /// Parse the leading four-digit year of a release date
    pub fn parse_release_year(release_date: &str) -> Option<u32> {
        let prefix = release_date.get(..4)?;
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        prefix.parse().ok()
    }

    /// Decade distribution of the tracks. Undated tracks are ignored.
    pub fn era_analysis(tracks: &[Track]) -> EraAnalysis {
        // (decade, count) in first-seen order
        let mut counts: Vec<(u32, u64)> = Vec::new();
        for year in tracks
            .iter()
            .filter_map(|track| Self::parse_release_year(&track.release_date))
        {
            let decade = (year / 10) * 10;
            match counts.iter_mut().find(|(d, _)| *d == decade) {
                Some((_, count)) => *count += 1,
                None => counts.push((decade, 1)),
            }
        }

        // Earliest-seen decade wins ties
        let Some(&(dominant, _)) = counts
            .iter()
            .reduce(|best, current| if current.1 > best.1 { current } else { best })
        else {
            return EraAnalysis {
                dominant_decade: "Unknown".to_string(),
                distribution: DecadeDistribution::default(),
                description: "Not enough release date data.".to_string(),
            };
        };

        let total: u64 = counts.iter().map(|(_, count)| count).sum();
        let mut distribution: Vec<(u32, u32)> = counts
            .iter()
            .map(|&(decade, count)| (decade, Rounding::to_percent(count, total)))
            .collect();
        distribution.sort_by_key(|(decade, _)| *decade);

        let dominant_decade = decade_label(dominant);
        EraAnalysis {
            description: format!("Most of your listening lives in the {dominant_decade}."),
            dominant_decade,
            distribution: DecadeDistribution(distribution),
        }
    }

    /// Composite of genre breadth and Shannon evenness, each weighted 0.5
    pub fn diversity_score(vector: &GenreVector, breadth_saturation: usize) -> DiversityScore {
        if vector.is_empty() {
            let label = DiversityLabel::Unknown;
            return DiversityScore {
                score: 0.0,
                label,
                description: label.description().to_string(),
            };
        }

        let total = vector.total_weight() as f64;
        let unique = vector.len();

        let breadth = (unique as f64 / breadth_saturation.max(1) as f64).min(1.0);

        let entropy: f64 = -vector
            .iter()
            .filter(|(_, weight)| *weight > 0)
            .map(|(_, weight)| {
                let p = f64::from(weight) / total;
                p * p.log2()
            })
            .sum::<f64>();
        let max_entropy = if unique > 1 {
            (unique as f64).log2()
        } else {
            1.0
        };
        let evenness = if max_entropy > 0.0 && entropy.is_finite() {
            entropy / max_entropy
        } else {
            0.0
        };

        let score = Rounding::to_decimals(breadth * 0.5 + evenness * 0.5, 2).clamp(0.0, 1.0);
        let label = DiversityLabel::for_score(score);

        DiversityScore {
            score,
            label,
            description: label.description().to_string(),
        }
    }
}
