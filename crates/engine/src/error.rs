//! Errors returned by the recommendation engine.
//!
//! Every variant is a problem with the caller's input. Nothing here is
//! fatal, and unknown seed ids are deliberately not an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The request carried no seed ids at all
    #[error("No movie ids provided.")]
    NoSeeds,

    /// Fewer distinct seed ids than the configured minimum
    #[error("Please select at least {required} movies.")]
    TooFewSeeds { required: usize, provided: usize },
}

impl RecommendError {
    /// Whether the error is the caller's fault (always true today)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoSeeds | Self::TooFewSeeds { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
