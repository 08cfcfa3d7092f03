//! SimilarityIndex building, validation and loading.
//!
//! Takes the parsed movie table and matrix and turns them into a model the
//! engine can query:
//! - order movies by dense index and check the indices are exactly `0..N`
//! - build the id -> index lookup, rejecting duplicate ids
//! - check the matrix dimension matches the movie count

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::traits::SimilarityStore;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// File name of the movie table inside a model directory
pub const MOVIES_FILE: &str = "movies.dat";

/// File name of the similarity matrix inside a model directory
pub const MATRIX_FILE: &str = "similarity.json";

impl SimilarityIndex {
    /// Load a model directory containing `movies.dat` and `similarity.json`
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Assemble and validate the index
    pub fn load_from_files(model_dir: &Path) -> Result<Self> {
        info!("Loading similarity model from {:?}", model_dir);

        let movies_path = model_dir.join(MOVIES_FILE);
        let matrix_path = model_dir.join(MATRIX_FILE);

        // The matrix is by far the larger file; parse the table alongside it
        let (records, matrix) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_matrix(&matrix_path),
        );

        let records = records?;
        let matrix = matrix?;

        info!(
            "Parsed {} movies and a {}x{} similarity matrix",
            records.len(),
            matrix.dimension(),
            matrix.dimension()
        );

        let index = Self::from_parts(records, matrix)?;
        info!("Similarity model successfully built and validated");
        Ok(index)
    }

    /// Assemble an index from parsed parts, validating that the dense
    /// indices form a bijection onto `0..N`
    pub fn from_parts(mut records: Vec<MovieRecord>, matrix: SimilarityMatrix) -> Result<Self> {
        if records.len() != matrix.dimension() {
            return Err(DataLoadError::DimensionMismatch {
                movies: records.len(),
                dimension: matrix.dimension(),
            });
        }

        records.sort_by_key(|r| r.index);

        let mut movies = Vec::with_capacity(records.len());
        let mut id_to_index = HashMap::with_capacity(records.len());

        for (expected, record) in records.into_iter().enumerate() {
            if record.index != expected {
                // Sorted, so a mismatch is either a repeat or a gap
                return Err(if record.index < expected {
                    DataLoadError::Duplicate {
                        field: "index".to_string(),
                        value: record.index.to_string(),
                    }
                } else {
                    DataLoadError::ValidationError(format!(
                        "dense index {} is missing from the movie table",
                        expected
                    ))
                });
            }

            if id_to_index.insert(record.movie.id, record.index).is_some() {
                return Err(DataLoadError::Duplicate {
                    field: "movieId".to_string(),
                    value: record.movie.id.to_string(),
                });
            }
            movies.push(record.movie);
        }

        Ok(Self {
            movies,
            id_to_index,
            matrix,
        })
    }

    /// Build an index from movies listed in dense-index order plus nested rows
    ///
    /// Mostly useful for tests and tools that generate a model in memory.
    pub fn from_rows(movies: Vec<Movie>, rows: Vec<Vec<f32>>) -> Result<Self> {
        let matrix = parser::matrix_from_rows(rows.len(), rows)?;
        let records = movies
            .into_iter()
            .enumerate()
            .map(|(index, movie)| MovieRecord { index, movie })
            .collect();
        Self::from_parts(records, matrix)
    }

    /// Largest `|s(i,j) - s(j,i)|` across the matrix
    pub fn max_asymmetry(&self) -> f32 {
        let n = self.matrix.dimension;
        let scores = &self.matrix.scores;
        (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| (scores[i * n + j] - scores[j * n + i]).abs())
                    .fold(0.0f32, f32::max)
            })
            .reduce(|| 0.0, f32::max)
    }

    /// Log a warning if the matrix is not symmetric within `tolerance`
    ///
    /// Returns whether the matrix passed. Asymmetry never fails a load.
    pub fn check_symmetry(&self, tolerance: f32) -> bool {
        let worst = self.max_asymmetry();
        if worst > tolerance {
            warn!(
                "Similarity matrix is not symmetric: max deviation {:.6} exceeds tolerance {:.6}",
                worst, tolerance
            );
            false
        } else {
            true
        }
    }

    /// Movies whose title contains `query`, case-insensitively
    ///
    /// Exact title matches come first, then by dense index.
    pub fn search_title(&self, query: &str) -> Vec<&Movie> {
        let query = query.to_lowercase();
        let mut matches: Vec<(bool, DenseIndex, &Movie)> = self
            .movies
            .iter()
            .enumerate()
            .filter_map(|(index, movie)| {
                let title = movie.title.to_lowercase();
                title
                    .contains(&query)
                    .then(|| (title != query, index, movie))
            })
            .collect();
        matches.sort_by_key(|&(inexact, index, _)| (inexact, index));
        matches.into_iter().map(|(_, _, movie)| movie).collect()
    }
}

impl SimilarityStore for SimilarityIndex {
    fn index_of(&self, movie_id: MovieId) -> Option<DenseIndex> {
        self.id_to_index.get(&movie_id).copied()
    }

    fn row(&self, index: DenseIndex) -> Option<&[f32]> {
        self.matrix.row(index)
    }

    fn movie_at(&self, index: DenseIndex) -> Option<&Movie> {
        self.movies.get(index)
    }

    fn len(&self) -> usize {
        self.movies.len()
    }
}
