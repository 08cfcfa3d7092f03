//! Core domain types for the similarity model.
//!
//! The model is two artifacts produced offline: a movie table that assigns
//! each movie a dense index, and an N x N similarity matrix addressed by
//! those indices.

use serde::Deserialize;
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Externally assigned, stable movie identifier (MovieLens `movieId`)
pub type MovieId = u32;

/// Contiguous row/column position of a movie inside the similarity matrix
pub type DenseIndex = usize;

// =============================================================================
// Movie Types
// =============================================================================

/// A movie as callers see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// One line of the movie table: a movie plus the dense index it was given
/// at model-build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub index: DenseIndex,
    pub movie: Movie,
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of similarity scores, stored row-major in one allocation.
///
/// Entry `(i, j)` is the similarity between the movies at dense indices
/// `i` and `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    pub(crate) dimension: usize,
    pub(crate) scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Matrix dimension N
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Borrow row `index` as a slice of length N
    pub fn row(&self, index: DenseIndex) -> Option<&[f32]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    /// Single entry lookup
    pub fn get(&self, i: DenseIndex, j: DenseIndex) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}

/// On-disk shape of `similarity.json`
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixFile {
    pub dimension: usize,
    pub scores: Vec<Vec<f32>>,
}

// =============================================================================
// SimilarityIndex - The In-Memory Model
// =============================================================================

/// Loaded model: dense-index movie table, id lookup and similarity matrix.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// behind an `Arc` across any number of request handlers.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    /// Movies in dense-index order (`movies[i]` is the movie at row `i`)
    pub(crate) movies: Vec<Movie>,
    /// Reverse lookup from public id to dense index
    pub(crate) id_to_index: HashMap<MovieId, DenseIndex>,
    pub(crate) matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// All movies in dense-index order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look a movie up by its public identifier
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.id_to_index.get(&id).map(|&index| &self.movies[index])
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}
