//! Axum route handlers for the assessment API: skill rating and job
//! recommendations. Thin glue: normalize at the boundary, then call the
//! pure engines.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assessment::matching::{match_jobs, MatchConfig, MatchResult};
use crate::assessment::profile::{normalize, RawProfile};
use crate::assessment::rating::rate_skills;
use crate::catalog::SkillCategory;
use crate::errors::AppError;
use crate::state::AppState;

// ----------------------------------------------------------------------------
// Request / Response types
// ----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SkillRatingResponse {
    pub category_ratings: BTreeMap<SkillCategory, f64>,
    pub overall_rating: f64,
    pub band: &'static str,
    pub rating_scale: &'static str,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<MatchResult>,
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

/// POST /api/v1/assess/skill-rating
///
/// Normalizes the submitted record and returns per-category skill ratings
/// with the overall band.
pub async fn handle_skill_rating(
    State(state): State<AppState>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<SkillRatingResponse>, AppError> {
    let profile = normalize(raw, &state.catalog)?;
    let result = rate_skills(&profile, &state.catalog);

    let category_ratings = result
        .category_ratings
        .iter()
        .map(|(category, rating)| (*category, round1(*rating)))
        .collect();

    Ok(Json(SkillRatingResponse {
        category_ratings,
        overall_rating: result.overall_rating,
        band: result.band.label(),
        rating_scale: "1-10",
        description: format!(
            "Shows {} level skills based on declared proficiencies, experience, and performance",
            result.band.label().to_lowercase()
        ),
    }))
}

/// POST /api/v1/recommendations/jobs?top_n=N
///
/// Ranks every catalog role against the submitted record. Uses the trained
/// salary estimator when one is installed, the band estimate otherwise.
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let profile = normalize(raw, &state.catalog)?;

    let config = MatchConfig {
        weights: state.config.match_weights,
        ..MatchConfig::default()
    };

    let recommendations = match_jobs(
        &profile,
        &state.catalog,
        &config,
        state.predictors.salary.as_deref(),
        query.top_n,
    );

    Ok(Json(RecommendationsResponse { recommendations }))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
