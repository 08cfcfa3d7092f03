use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use data_loader::{MovieId, SimilarityStore};
use engine::Recommendation;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Returned for any body that isn't a JSON object with an id array
pub const INVALID_BODY: &str = "Request body must be JSON with a movieIds array";

// Request/Response types

/// A movie id as clients send it: any JSON number or string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawMovieId {
    Number(serde_json::Number),
    Text(String),
}

/// A requested seed, either a readable movie id or the raw text of one
/// that can never match the model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMovieId")]
pub enum SeedId {
    Id(MovieId),
    Unmapped(String),
}

impl From<RawMovieId> for SeedId {
    fn from(raw: RawMovieId) -> Self {
        match raw {
            RawMovieId::Number(number) => number
                .as_u64()
                .and_then(|id| MovieId::try_from(id).ok())
                .map(SeedId::Id)
                .unwrap_or_else(|| SeedId::Unmapped(number.to_string())),
            RawMovieId::Text(text) => match text.trim().parse() {
                Ok(id) => SeedId::Id(id),
                Err(_) => SeedId::Unmapped(text),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// `movieIds` is canonical; `movie_ids` is still accepted
    #[serde(rename = "movieIds", alias = "movie_ids", default)]
    pub movie_ids: Vec<SeedId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<Recommendation> for MovieResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            movie_id: rec.movie_id,
            title: rec.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub movies: usize,
    pub version: String,
}

// Handlers

/// Plain-text liveness banner
pub async fn index() -> &'static str {
    "Movie Match backend is running!"
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        movies: state.engine.store().len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Rank movies similar to the ones in the request body
pub async fn recommend(
    State(state): State<AppState>,
    query: Result<Query<RecommendParams>, QueryRejection>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let Query(params) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let Json(request) = body.map_err(|rejection| {
        debug!("Rejected recommend body: {}", rejection.body_text());
        AppError::BadRequest(INVALID_BODY.to_string())
    })?;

    let limit = match params.limit {
        Some(limit) if limit == 0 || limit > state.max_limit => {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                state.max_limit
            )));
        }
        Some(limit) => limit,
        None => state.engine.config().top_k,
    };

    let mut seeds: Vec<MovieId> = Vec::with_capacity(request.movie_ids.len());
    let mut unmapped = BTreeSet::new();
    for seed in request.movie_ids {
        match seed {
            SeedId::Id(id) => seeds.push(id),
            SeedId::Unmapped(raw) => {
                debug!("Skipping unreadable movie id {:?}", raw);
                unmapped.insert(raw);
            }
        }
    }
    debug!(
        "Recommend request with {} seeds ({} unreadable), limit {}",
        seeds.len() + unmapped.len(),
        unmapped.len(),
        limit
    );

    // Ranking walks whole matrix rows; keep it off the async workers
    let engine = state.engine.clone();
    let min_seeds = engine.config().min_seeds;
    let recommendations = tokio::task::spawn_blocking(move || {
        engine.recommend_with_unmapped(&seeds, unmapped.len(), limit, min_seeds)
    })
    .await
    .map_err(|e| AppError::Internal(format!("recommendation task failed: {}", e)))??;

    info!("Returning {} recommendations", recommendations.len());
    Ok(Json(
        recommendations.into_iter().map(MovieResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_both_field_names() {
        let canonical: RecommendRequest = serde_json::from_str(r#"{"movieIds": [1, 2]}"#).unwrap();
        assert_eq!(canonical.movie_ids, vec![SeedId::Id(1), SeedId::Id(2)]);

        let legacy: RecommendRequest = serde_json::from_str(r#"{"movie_ids": [3]}"#).unwrap();
        assert_eq!(legacy.movie_ids, vec![SeedId::Id(3)]);
    }

    #[test]
    fn test_request_accepts_numeric_strings() {
        let request: RecommendRequest =
            serde_json::from_str(r#"{"movieIds": ["862", 597, " 120 "]}"#).unwrap();
        assert_eq!(
            request.movie_ids,
            vec![SeedId::Id(862), SeedId::Id(597), SeedId::Id(120)]
        );
    }

    #[test]
    fn test_unreadable_ids_become_unmapped() {
        let request: RecommendRequest = serde_json::from_str(
            r#"{"movieIds": ["toy story", -1, 1.5, 99999999999, 4]}"#,
        )
        .unwrap();
        assert_eq!(
            request.movie_ids,
            vec![
                SeedId::Unmapped("toy story".to_string()),
                SeedId::Unmapped("-1".to_string()),
                SeedId::Unmapped("1.5".to_string()),
                SeedId::Unmapped("99999999999".to_string()),
                SeedId::Id(4),
            ]
        );
    }

    #[test]
    fn test_request_rejects_non_scalar_ids() {
        let result: Result<RecommendRequest, _> =
            serde_json::from_str(r#"{"movieIds": [{"id": 1}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field_is_empty() {
        let request: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert!(request.movie_ids.is_empty());
    }

    #[test]
    fn test_movie_response_shape() {
        let response = MovieResponse::from(Recommendation {
            movie_id: 7,
            title: "Heat (1995)".to_string(),
            score: 1.5,
        });
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, serde_json::json!({"movieId": 7, "title": "Heat (1995)"}));
    }
}
