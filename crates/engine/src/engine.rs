//! # Recommendation Engine
//!
//! Turns a set of liked movies into a ranked list of similar ones:
//! 1. Validate the seed set
//! 2. Resolve seed ids to dense indices (unknown ids are dropped)
//! 3. Sum similarity rows across seeds
//! 4. Rank, cut to K, and translate back to movies

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use data_loader::{DenseIndex, MovieId, SimilarityStore};

use crate::config::EngineConfig;
use crate::error::{RecommendError, Result};
use crate::scoring;

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// Sum of similarities to every resolved seed
    pub score: f64,
}

/// Recommender over a shared, immutable similarity store
pub struct RecommendationEngine<S: SimilarityStore> {
    store: Arc<S>,
    config: EngineConfig,
}

// Manual impl: cloning only bumps the Arc, so S itself needn't be Clone
impl<S: SimilarityStore> Clone for RecommendationEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: SimilarityStore> RecommendationEngine<S> {
    /// Create an engine with the default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recommend using the configured K and seed minimum
    pub fn recommend(&self, seed_ids: &[MovieId]) -> Result<Vec<Recommendation>> {
        self.recommend_with(seed_ids, self.config.top_k, self.config.min_seeds)
    }

    /// Recommend with an explicit K and seed minimum
    ///
    /// # Returns
    /// Up to `k` movies, best first, never including a seed. An empty list
    /// (not an error) when none of the seeds are known to the model.
    pub fn recommend_with(
        &self,
        seed_ids: &[MovieId],
        k: usize,
        min_seeds: usize,
    ) -> Result<Vec<Recommendation>> {
        self.recommend_with_unmapped(seed_ids, 0, k, min_seeds)
    }

    /// Like [`recommend_with`](Self::recommend_with), for callers that also
    /// received ids they could not read as a `MovieId`
    ///
    /// `unmapped` is the number of such distinct ids. They count toward
    /// `min_seeds` and are otherwise skipped like unknown ids.
    #[instrument(skip(self, seed_ids), fields(seeds = seed_ids.len()))]
    pub fn recommend_with_unmapped(
        &self,
        seed_ids: &[MovieId],
        unmapped: usize,
        k: usize,
        min_seeds: usize,
    ) -> Result<Vec<Recommendation>> {
        let seeds = validate_seeds(seed_ids, unmapped, min_seeds)?;

        let resolved = self.resolve_seeds(&seeds);
        if resolved.is_empty() {
            debug!("None of {} seed ids are in the model", seeds.len() + unmapped);
            return Ok(Vec::new());
        }

        let candidates = scoring::aggregate_scores(self.store.as_ref(), &resolved);
        let ranked = scoring::top_k(candidates, k);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.store.movie_at(candidate.index)?;
                Some(Recommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score: candidate.score,
                })
            })
            .collect();

        debug!(
            "Ranked {} recommendations from {} resolved seeds",
            recommendations.len(),
            resolved.len()
        );
        Ok(recommendations)
    }

    /// Nearest neighbours of a single movie
    pub fn similar_to(&self, movie_id: MovieId, k: usize) -> Result<Vec<Recommendation>> {
        self.recommend_with(&[movie_id], k, 1)
    }

    /// Map seed ids to dense indices in ascending order, dropping unknown ids
    fn resolve_seeds(&self, seeds: &BTreeSet<MovieId>) -> Vec<DenseIndex> {
        let mut resolved = Vec::with_capacity(seeds.len());
        for &movie_id in seeds {
            match self.store.index_of(movie_id) {
                Some(index) => resolved.push(index),
                None => debug!("Dropping unknown seed movie {}", movie_id),
            }
        }
        // Fixed summation order keeps scores bit-identical across calls
        resolved.sort_unstable();
        resolved
    }
}

/// Reject empty or undersized seed lists; returns the distinct ids
fn validate_seeds(
    seed_ids: &[MovieId],
    unmapped: usize,
    min_seeds: usize,
) -> Result<BTreeSet<MovieId>> {
    if seed_ids.is_empty() && unmapped == 0 {
        return Err(RecommendError::NoSeeds);
    }

    let distinct: BTreeSet<MovieId> = seed_ids.iter().copied().collect();
    let provided = distinct.len() + unmapped;
    if provided < min_seeds {
        return Err(RecommendError::TooFewSeeds {
            required: min_seeds,
            provided,
        });
    }
    Ok(distinct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, SimilarityIndex};

    fn build_engine() -> RecommendationEngine<SimilarityIndex> {
        let index = SimilarityIndex::from_rows(
            vec![
                Movie::new(1, "The Matrix (1999)"),
                Movie::new(2, "Toy Story (1995)"),
                Movie::new(3, "Pulp Fiction (1994)"),
            ],
            vec![
                vec![1.0, 0.9, 0.1],
                vec![0.9, 1.0, 0.2],
                vec![0.1, 0.2, 1.0],
            ],
        )
        .unwrap();
        RecommendationEngine::new(Arc::new(index))
    }

    #[test]
    fn test_validate_seeds() {
        assert_eq!(validate_seeds(&[], 0, 0), Err(RecommendError::NoSeeds));
        assert_eq!(
            validate_seeds(&[1, 1, 2], 0, 3),
            Err(RecommendError::TooFewSeeds { required: 3, provided: 2 })
        );
        let distinct = validate_seeds(&[3, 1, 3], 0, 2).unwrap();
        assert_eq!(distinct.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_recommend_single_seed() {
        let engine = build_engine();
        let recs = engine.recommend(&[1]).unwrap();

        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(recs[0].title, "Toy Story (1995)");
    }

    #[test]
    fn test_unknown_seeds_are_dropped() {
        let engine = build_engine();

        assert!(engine.recommend(&[42]).unwrap().is_empty());

        let with_unknown = engine.recommend(&[42, 1]).unwrap();
        let without = engine.recommend(&[1]).unwrap();
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_unmapped_ids_count_toward_minimum() {
        let engine = build_engine();

        // Only unmapped ids: validated, then nothing resolves
        assert!(engine.recommend_with_unmapped(&[], 1, 20, 1).unwrap().is_empty());

        let recs = engine.recommend_with_unmapped(&[1], 1, 20, 2).unwrap();
        assert_eq!(recs, engine.recommend(&[1]).unwrap());

        assert_eq!(
            engine.recommend_with_unmapped(&[1], 1, 20, 3),
            Err(RecommendError::TooFewSeeds { required: 3, provided: 2 })
        );
    }

    #[test]
    fn test_duplicate_seeds_count_once() {
        let engine = build_engine();
        let recs = engine.recommend(&[1, 1, 1]).unwrap();
        assert_eq!(recs.len(), 2);
        assert!((recs[0].score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_similar_to() {
        let engine = build_engine();
        let recs = engine.similar_to(3, 1).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 2);
    }

    #[test]
    fn test_clone_shares_store() {
        let engine = build_engine();
        let cloned = engine.clone();
        assert!(std::ptr::eq(engine.store(), cloned.store()));
    }
}
