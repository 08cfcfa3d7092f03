//! Engine tuning knobs.

/// Number of recommendations returned when the caller doesn't ask otherwise
pub const DEFAULT_TOP_K: usize = 20;

/// Minimum distinct seed ids a request must carry
pub const DEFAULT_MIN_SEEDS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How many movies to return (K)
    pub top_k: usize,
    /// Requests with fewer distinct seeds than this are rejected
    pub min_seeds: usize,
}

impl EngineConfig {
    /// Configure result length (default: 20)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Configure minimum seed count (default: 1)
    pub fn with_min_seeds(mut self, min_seeds: usize) -> Self {
        self.min_seeds = min_seeds;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_seeds: DEFAULT_MIN_SEEDS,
        }
    }
}
