//! Axum route handlers for the prediction API. Each endpoint requires its
//! model to be installed; a missing model answers 503 rather than failing
//! the whole service.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::assessment::profile::{normalize, RawProfile};
use crate::errors::AppError;
use crate::state::AppState;

// ----------------------------------------------------------------------------
// Response types
// ----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RetentionResponse {
    pub will_leave: bool,
    pub leave_probability: f64,
    pub stay_probability: f64,
    pub risk_level: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SalaryPredictionResponse {
    pub predicted_salary: f64,
    pub current_salary: f64,
    pub growth_amount: f64,
    pub growth_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct SalaryRangeBody {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize)]
pub struct RolePredictionResponse {
    pub recommended_role: String,
    pub confidence: f64,
    pub confidence_level: &'static str,
    pub salary_range: Option<SalaryRangeBody>,
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

/// POST /api/v1/predict/retention
pub async fn handle_predict_retention(
    State(state): State<AppState>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<RetentionResponse>, AppError> {
    let model = state
        .predictors
        .retention
        .clone()
        .ok_or(AppError::ModelUnavailable)?;

    let profile = normalize(raw, &state.catalog)?;
    let prediction = model.predict(&profile.feature_vector());

    Ok(Json(RetentionResponse {
        will_leave: prediction.will_leave,
        leave_probability: round3(prediction.leave_probability),
        stay_probability: round3(prediction.stay_probability),
        risk_level: prediction.risk_level(),
    }))
}

/// POST /api/v1/predict/salary
pub async fn handle_predict_salary(
    State(state): State<AppState>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<SalaryPredictionResponse>, AppError> {
    let model = state
        .predictors
        .salary
        .clone()
        .ok_or(AppError::ModelUnavailable)?;

    let profile = normalize(raw, &state.catalog)?;
    let predicted_salary = model.estimate(&profile.feature_vector());

    let growth_amount = predicted_salary - profile.salary;
    let growth_percentage = if profile.salary > 0.0 {
        growth_amount / profile.salary * 100.0
    } else {
        0.0
    };

    Ok(Json(SalaryPredictionResponse {
        predicted_salary: round2(predicted_salary),
        current_salary: profile.salary,
        growth_amount: round2(growth_amount),
        growth_percentage: round2(growth_percentage),
    }))
}

/// POST /api/v1/predict/role
pub async fn handle_predict_role(
    State(state): State<AppState>,
    Json(raw): Json<RawProfile>,
) -> Result<Json<RolePredictionResponse>, AppError> {
    let model = state
        .predictors
        .role
        .clone()
        .ok_or(AppError::ModelUnavailable)?;

    let profile = normalize(raw, &state.catalog)?;
    let prediction = model.predict(&profile.feature_vector());

    let salary_range = state
        .catalog
        .role(&prediction.role)
        .map(|role| SalaryRangeBody {
            min: role.salary_min,
            max: role.salary_max,
        });

    Ok(Json(RolePredictionResponse {
        confidence: round3(prediction.confidence),
        confidence_level: prediction.confidence_level(),
        recommended_role: prediction.role,
        salary_range,
    }))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
