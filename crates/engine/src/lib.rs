//! # Engine Crate
//!
//! Content-based movie recommendations from a precomputed item-item
//! similarity matrix.
//!
//! Given the movies a user likes (the *seeds*), every other movie is scored
//! by the sum of its similarities to all seeds, so a movie close to several
//! seeds beats one that is very close to just one of them.
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::SimilarityIndex;
//! use engine::{EngineConfig, RecommendationEngine};
//! use std::sync::Arc;
//!
//! let index = Arc::new(SimilarityIndex::load_from_files(Path::new("model"))?);
//! let engine = RecommendationEngine::with_config(index, EngineConfig::default().with_min_seeds(5));
//!
//! for rec in engine.recommend(&[1, 32, 260, 1196, 2571])? {
//!     println!("{} ({:.3})", rec.title, rec.score);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod scoring;

// Re-export main types
pub use config::{DEFAULT_MIN_SEEDS, DEFAULT_TOP_K, EngineConfig};
pub use engine::{Recommendation, RecommendationEngine};
pub use error::{RecommendError, Result};
pub use scoring::CandidateScore;
