//! Read-only access to a similarity model.
//!
//! The engine only ever talks to this trait, so tests can hand it a small
//! hand-built store and the server can hand it the loaded artifacts.

use crate::types::{DenseIndex, Movie, MovieId};

/// Lookup surface the recommendation engine needs from a loaded model.
///
/// ## Design Note
/// - `Send + Sync` lets one store be shared across request handlers
/// - Every method borrows; a store is never mutated after construction
pub trait SimilarityStore: Send + Sync {
    /// Dense index for a public movie id, or `None` if the model doesn't know it
    fn index_of(&self, movie_id: MovieId) -> Option<DenseIndex>;

    /// Full similarity row for `index`, position `j` holding similarity to movie `j`
    fn row(&self, index: DenseIndex) -> Option<&[f32]>;

    /// Movie stored at a dense index
    fn movie_at(&self, index: DenseIndex) -> Option<&Movie>;

    /// Matrix dimension N
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
