use serde::{Deserialize, Serialize};

/// Tuning knobs for profile generation. The defaults reproduce the
/// reference behaviour; label thresholds stay fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub top_genre_limit: usize, // Number of genres listed in the profile
    pub breadth_saturation: usize, // Unique genre count at which breadth reaches 1.0
    pub representative_genre_count: usize, // Keywords exposed for the winning archetype
    pub taste_map_genre_count: usize, // Genres attached to each taste map point
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            top_genre_limit: 12,
            breadth_saturation: 30,
            representative_genre_count: 4,
            taste_map_genre_count: 2,
        }
    }
}

impl ProfileConfig {
    /// Load a profile configuration from a JSON file
    pub fn load_from_file(path: &str) -> Result<ProfileConfig, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ProfileConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make a calculator divide by zero
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.breadth_saturation == 0 {
            return Err("breadth_saturation must be greater than zero".into());
        }
        Ok(())
    }
}
