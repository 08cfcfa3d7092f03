//! Similarity-sum aggregation and top-K ranking.
//!
//! ## Algorithm
//! 1. Mark every resolved seed index as excluded
//! 2. For each seed, walk its similarity row and add each entry to the
//!    running total of that column's movie
//! 3. Keep every non-seed movie as a candidate with its total
//! 4. Order by total descending, dense index ascending on ties, and cut to K

use data_loader::{DenseIndex, SimilarityStore};
use std::cmp::Ordering;

/// A movie (by dense index) and its aggregate similarity to the seed set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub index: DenseIndex,
    pub score: f64,
}

/// Sum each seed's similarity row into one score per non-seed movie.
///
/// Seeds whose row is missing contribute nothing. Totals accumulate in
/// `f64` so long seed lists don't lose precision.
pub fn aggregate_scores<S>(store: &S, seeds: &[DenseIndex]) -> Vec<CandidateScore>
where
    S: SimilarityStore + ?Sized,
{
    let n = store.len();
    let mut excluded = vec![false; n];
    for &seed in seeds {
        if let Some(flag) = excluded.get_mut(seed) {
            *flag = true;
        }
    }

    let mut totals = vec![0.0f64; n];
    for &seed in seeds {
        let Some(row) = store.row(seed) else {
            continue;
        };
        for ((total, &similarity), &skip) in totals.iter_mut().zip(row).zip(&excluded) {
            if !skip {
                *total += f64::from(similarity);
            }
        }
    }

    totals
        .into_iter()
        .enumerate()
        .filter(|&(index, _)| !excluded[index])
        .map(|(index, score)| CandidateScore { index, score })
        .collect()
}

/// Rank order: higher score first, then lower dense index
fn rank_order(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Keep the `k` best candidates in rank order
pub fn top_k(mut candidates: Vec<CandidateScore>, k: usize) -> Vec<CandidateScore> {
    if k == 0 {
        return Vec::new();
    }
    if k < candidates.len() {
        // rank_order is total, so partitioning first gives the same prefix a full sort would
        candidates.select_nth_unstable_by(k - 1, rank_order);
        candidates.truncate(k);
    }
    candidates.sort_by(rank_order);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, SimilarityIndex};

    fn store(rows: Vec<Vec<f32>>) -> SimilarityIndex {
        let movies = (0..rows.len())
            .map(|i| Movie::new(i as u32 + 100, format!("Movie {}", i)))
            .collect();
        SimilarityIndex::from_rows(movies, rows).unwrap()
    }

    #[test]
    fn test_single_seed_scores_equal_row() {
        let index = store(vec![
            vec![1.0, 0.9, 0.1],
            vec![0.9, 1.0, 0.4],
            vec![0.1, 0.4, 1.0],
        ]);

        let scores = aggregate_scores(&index, &[0]);

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0], CandidateScore { index: 1, score: f64::from(0.9f32) });
        assert_eq!(scores[1], CandidateScore { index: 2, score: f64::from(0.1f32) });
    }

    #[test]
    fn test_scores_sum_across_seeds() {
        let index = store(vec![
            vec![1.0, 0.2, 0.5, 0.0],
            vec![0.2, 1.0, 0.5, 0.3],
            vec![0.5, 0.5, 1.0, 0.1],
            vec![0.0, 0.3, 0.1, 1.0],
        ]);

        let scores = aggregate_scores(&index, &[0, 1]);
        let by_index: Vec<(usize, f64)> = scores.iter().map(|c| (c.index, c.score)).collect();

        assert_eq!(by_index.len(), 2);
        assert_eq!(by_index[0].0, 2);
        assert!((by_index[0].1 - 1.0).abs() < 1e-6);
        assert_eq!(by_index[1].0, 3);
        assert!((by_index[1].1 - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_seeds_are_excluded() {
        let index = store(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        assert!(aggregate_scores(&index, &[0, 1]).is_empty());
    }

    #[test]
    fn test_top_k_orders_and_breaks_ties_by_index() {
        let candidates = vec![
            CandidateScore { index: 4, score: 0.5 },
            CandidateScore { index: 1, score: 0.5 },
            CandidateScore { index: 2, score: 0.9 },
            CandidateScore { index: 3, score: 0.1 },
        ];

        let ranked: Vec<usize> = top_k(candidates.clone(), 10).iter().map(|c| c.index).collect();
        assert_eq!(ranked, vec![2, 1, 4, 3]);

        let ranked: Vec<usize> = top_k(candidates, 2).iter().map(|c| c.index).collect();
        assert_eq!(ranked, vec![2, 1]);
    }

    #[test]
    fn test_top_k_partial_selection_matches_full_sort() {
        let candidates: Vec<CandidateScore> = (0..50)
            .map(|i| CandidateScore { index: i, score: ((i * 37) % 11) as f64 })
            .collect();

        let mut full = candidates.clone();
        full.sort_by(rank_order);
        full.truncate(7);

        assert_eq!(top_k(candidates, 7), full);
    }

    #[test]
    fn test_top_k_zero() {
        let candidates = vec![CandidateScore { index: 0, score: 1.0 }];
        assert!(top_k(candidates, 0).is_empty());
    }
}
