use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::{Artist, Track};

/// Weight added for every genre tag found on a top artist
pub const ARTIST_GENRE_WEIGHT: u32 = 2;
/// Weight added for every genre tag found on a top track
pub const TRACK_GENRE_WEIGHT: u32 = 1;

/// Weighted genre fingerprint.
///
/// Entries are kept sorted by descending weight; equal weights keep the
/// order in which the genre was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreVector {
    entries: Vec<(String, u32)>,
}

impl GenreVector {
    /// Build the fingerprint of a listener from their top artists and tracks.
    /// Genre labels are lowercased before aggregation.
    pub fn build(artists: &[Artist], tracks: &[Track]) -> Self {
        let artist_genres = artists
            .iter()
            .flat_map(|artist| artist.genres.iter())
            .map(|genre| (genre.to_lowercase(), ARTIST_GENRE_WEIGHT));
        let track_genres = tracks
            .iter()
            .flat_map(|track| track.genres.iter())
            .map(|genre| (genre.to_lowercase(), TRACK_GENRE_WEIGHT));

        Self::accumulate(artist_genres.chain(track_genres))
    }

    /// Build a vector from an existing genre/weight mapping, e.g. the one
    /// shared by another listener. Repeated keys are summed.
    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self::accumulate(weights.into_iter().map(|(genre, weight)| (genre.into(), weight)))
    }

    fn accumulate(weights: impl Iterator<Item = (String, u32)>) -> Self {
        let mut entries: Vec<(String, u32)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (genre, weight) in weights {
            match index.get(&genre) {
                Some(&position) => entries[position].1 += weight,
                None => {
                    index.insert(genre.clone(), entries.len());
                    entries.push((genre, weight));
                }
            }
        }

        // Stable sort keeps first-seen order among equal weights
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// Iterate over (genre, weight) pairs in descending weight order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(genre, weight)| (genre.as_str(), *weight))
    }

    #[cfg(test)]
    pub fn get(&self, genre: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(g, _)| g == genre)
            .map(|(_, weight)| *weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, weight)| u64::from(*weight)).sum()
    }

    /// The `limit` heaviest genres
    pub fn top(&self, limit: usize) -> impl Iterator<Item = (&str, u32)> {
        self.iter().take(limit)
    }
}

impl Serialize for GenreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (genre, weight) in &self.entries {
            map.serialize_entry(genre, weight)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GenreVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let weights = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(Self::from_weights(weights))
    }
}
