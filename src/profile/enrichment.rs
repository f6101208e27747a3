use std::collections::HashMap;

use tracing::debug;

use crate::models::{Artist, Track};

/// Fills in genres for tracks that arrive without any
pub struct GenreEnrichment;

impl GenreEnrichment {
    /// Give every genre-less track the genres of its credited artists that
    /// appear among the top artists, de-duplicated in first-seen order.
    /// Returns the number of tracks that gained genres.
    pub fn enrich_tracks(tracks: &mut [Track], artists: &[Artist]) -> usize {
        let artist_genres: HashMap<&str, &[String]> = artists
            .iter()
            .filter(|artist| !artist.id.is_empty())
            .map(|artist| (artist.id.as_str(), artist.genres.as_slice()))
            .collect();

        let mut enriched = 0;
        for track in tracks.iter_mut().filter(|track| track.genres.is_empty()) {
            let mut genres: Vec<String> = Vec::new();
            for genre in track
                .artist_ids
                .iter()
                .filter_map(|id| artist_genres.get(id.as_str()))
                .flat_map(|tags| tags.iter())
            {
                if !genres.contains(genre) {
                    genres.push(genre.clone());
                }
            }

            if !genres.is_empty() {
                track.genres = genres;
                enriched += 1;
            }
        }

        debug!("Enriched {} of {} tracks with artist genres", enriched, tracks.len());
        enriched
    }
}
