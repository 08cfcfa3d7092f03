//! # Data Loader Crate
//!
//! Loads the precomputed similarity model that recommendations are served
//! from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, SimilarityIndex)
//! - **parser**: Parse `movies.dat` and `similarity.json`
//! - **index**: Assemble and validate a SimilarityIndex
//! - **traits**: The `SimilarityStore` lookup trait the engine consumes
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{SimilarityIndex, SimilarityStore};
//! use std::path::Path;
//!
//! let index = SimilarityIndex::load_from_files(Path::new("model"))?;
//!
//! let row = index.index_of(1).and_then(|i| index.row(i));
//! println!("{} movies loaded", index.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod traits;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MATRIX_FILE, MOVIES_FILE};
pub use traits::SimilarityStore;
pub use types::{
    // Type aliases
    MovieId,
    DenseIndex,
    // Core types
    Movie,
    MovieRecord,
    MatrixFile,
    SimilarityMatrix,
    SimilarityIndex,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = SimilarityIndex::from_rows(Vec::new(), Vec::new()).unwrap();

        assert!(index.is_empty());
        assert_eq!(index.index_of(1), None);
        assert!(index.row(0).is_none());
        assert!(index.movie_at(0).is_none());
    }

    #[test]
    fn test_store_is_object_safe() {
        let index = SimilarityIndex::from_rows(
            vec![Movie::new(5, "Fargo (1996)")],
            vec![vec![1.0]],
        )
        .unwrap();

        let store: &dyn SimilarityStore = &index;
        assert_eq!(store.len(), 1);
        assert_eq!(store.movie_at(0).unwrap().title, "Fargo (1996)");
    }
}
