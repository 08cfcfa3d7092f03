use std::sync::Arc;

use data_loader::SimilarityIndex;
use engine::{EngineConfig, RecommendationEngine};

/// Shared application state
///
/// Everything in here is read-only after startup, so handlers share it
/// without locks.
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine<SimilarityIndex>,
    /// Largest `limit` a request may ask for
    pub max_limit: usize,
}

impl AppState {
    pub fn new(index: Arc<SimilarityIndex>, config: EngineConfig, max_limit: usize) -> Self {
        Self {
            engine: RecommendationEngine::with_config(index, config),
            max_limit,
        }
    }
}
