//! Two-dimensional taste map of a listener's top artists.
//!
//! Artists become rows of a binary artist x genre membership matrix which
//! is reduced to at most two principal components. The numeric backend sits
//! behind [`Projector`]; any backend failure yields an empty map.

use std::collections::BTreeSet;

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, Axis};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::utils::Rounding;
use crate::models::Artist;

const MAX_EIGEN_ITERATIONS: usize = 1000;
const SIGN_TIE_TOLERANCE: f64 = 1e-9;

/// Failures of the dimensionality reduction backend
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("matrix shape {rows}x{cols} cannot be reduced")]
    Shape { rows: usize, cols: usize },

    #[error("cannot extract {requested} components from a {rows}x{cols} matrix")]
    InvalidComponents {
        requested: usize,
        rows: usize,
        cols: usize,
    },

    #[error("matrix contains non-finite values")]
    NonFinite,

    #[error("eigen decomposition did not converge after {0} iterations")]
    NoConvergence(usize),
}

/// Reduces an N x M matrix to `components` coordinates per row
#[cfg_attr(test, mockall::automock)]
pub trait Projector {
    fn project(
        &self,
        matrix: &Array2<f64>,
        components: usize,
    ) -> Result<Array2<f64>, ProjectionError>;
}

/// Principal component analysis over column-centred data
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaProjector;

impl Projector for PcaProjector {
    fn project(
        &self,
        matrix: &Array2<f64>,
        components: usize,
    ) -> Result<Array2<f64>, ProjectionError> {
        let (rows, cols) = matrix.dim();
        if rows == 0 || cols == 0 {
            return Err(ProjectionError::Shape { rows, cols });
        }
        if components == 0 || components > rows.min(cols) {
            return Err(ProjectionError::InvalidComponents {
                requested: components,
                rows,
                cols,
            });
        }
        if matrix.iter().any(|value| !value.is_finite()) {
            return Err(ProjectionError::NonFinite);
        }

        let means = matrix
            .mean_axis(Axis(0))
            .ok_or(ProjectionError::Shape { rows, cols })?;
        let centred = matrix - &means;

        // Eigenvectors of the row Gram matrix give the scores directly:
        // score_k = u_k * sqrt(lambda_k)
        let gram = centred.dot(&centred.t());
        let gram = DMatrix::from_fn(rows, rows, |row, col| gram[[row, col]]);
        let eigen = SymmetricEigen::try_new(gram, f64::EPSILON, MAX_EIGEN_ITERATIONS)
            .ok_or(ProjectionError::NoConvergence(MAX_EIGEN_ITERATIONS))?;
        let eigenvalues = &eigen.eigenvalues;

        let mut order: Vec<usize> = (0..rows).collect();
        order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

        let trace: f64 = eigenvalues.iter().map(|value| value.max(0.0)).sum();
        let tolerance = 1e-12 * trace.max(1.0);

        let mut scores = Array2::<f64>::zeros((rows, components));
        for (component, &index) in order.iter().take(components).enumerate() {
            let variance = eigenvalues[index];
            if variance <= tolerance {
                // No spread along this axis
                continue;
            }

            let singular = variance.sqrt();
            let u: Array1<f64> = eigen.eigenvectors.column(index).iter().copied().collect();
            let loadings: Array1<f64> = centred.t().dot(&u) / singular;

            // Largest absolute loading is made positive, earliest genre on ties
            let sign = loadings
                .iter()
                .copied()
                .reduce(|best, value| {
                    if value.abs() - best.abs() > SIGN_TIE_TOLERANCE {
                        value
                    } else {
                        best
                    }
                })
                .map_or(1.0, |value| if value < 0.0 { -1.0 } else { 1.0 });

            scores
                .column_mut(component)
                .assign(&(&u * (singular * sign)));
        }

        if scores.iter().any(|value| !value.is_finite()) {
            return Err(ProjectionError::NonFinite);
        }
        Ok(scores)
    }
}

/// One artist placed on the taste map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteMapPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub image: Option<String>,
    pub genres: Vec<String>,
}

/// Places artists on a 2D map by genre similarity
pub struct TasteMapProjector<P = PcaProjector> {
    projector: P,
    genre_count: usize,
}

impl TasteMapProjector<PcaProjector> {
    pub fn new(genre_count: usize) -> Self {
        Self::with_projector(PcaProjector, genre_count)
    }
}

impl<P: Projector> TasteMapProjector<P> {
    pub fn with_projector(projector: P, genre_count: usize) -> Self {
        Self {
            projector,
            genre_count,
        }
    }

    /// Binary membership matrix: rows follow `artists`, columns follow `genres`
    pub fn membership_matrix(artists: &[&Artist], genres: &[&str]) -> Array2<f64> {
        Array2::from_shape_fn((artists.len(), genres.len()), |(row, col)| {
            if artists[row].genres.iter().any(|genre| genre == genres[col]) {
                1.0
            } else {
                0.0
            }
        })
    }

    /// Project artists onto the map. Returns an empty list when there is too
    /// little genre data or the projection fails.
    pub fn project(&self, artists: &[Artist]) -> Vec<TasteMapPoint> {
        let with_genres: Vec<&Artist> = artists.iter().filter(|a| a.has_genres()).collect();
        if with_genres.len() < 2 {
            return Vec::new();
        }

        let genres: Vec<&str> = with_genres
            .iter()
            .flat_map(|artist| artist.genres.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if genres.len() < 2 {
            return Vec::new();
        }

        let matrix = Self::membership_matrix(&with_genres, &genres);
        let components = 2.min(with_genres.len() - 1).min(genres.len());
        if components < 1 {
            return Vec::new();
        }

        debug!(
            "Projecting {}x{} genre matrix onto {} component(s)",
            with_genres.len(),
            genres.len(),
            components
        );

        let coords = match self.projector.project(&matrix, components) {
            Ok(coords) => coords,
            Err(e) => {
                warn!("Taste map projection failed: {e}");
                return Vec::new();
            }
        };
        if coords.nrows() != with_genres.len() || coords.ncols() == 0 {
            warn!(
                "Taste map projection returned a {}x{} matrix for {} artists",
                coords.nrows(),
                coords.ncols(),
                with_genres.len()
            );
            return Vec::new();
        }

        with_genres
            .iter()
            .enumerate()
            .map(|(row, artist)| TasteMapPoint {
                name: artist.name.clone(),
                x: Rounding::to_decimals(coords[[row, 0]], 3),
                y: if coords.ncols() > 1 {
                    Rounding::to_decimals(coords[[row, 1]], 3)
                } else {
                    0.0
                },
                image: artist.image.clone(),
                genres: artist.genres.iter().take(self.genre_count).cloned().collect(),
            })
            .collect()
    }
}
