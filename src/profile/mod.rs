pub mod aggregator;
pub mod archetype;
pub mod compatibility;
pub mod config;
pub mod enrichment;
pub mod genre_vector;
pub mod model;
pub mod scoring;
pub mod taste_map;
pub mod utils;

#[cfg(test)]
mod taste_map_tests;

pub use aggregator::*;
pub use config::*;
pub use genre_vector::*;
pub use model::*;
