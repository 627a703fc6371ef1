pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::catalog::handlers as catalog;
use crate::employees::handlers as employees;
use crate::predictors::handlers as predictors;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/catalog/roles", get(catalog::handle_list_roles))
        .route("/api/v1/catalog/skills", get(catalog::handle_list_skills))
        // Employee API
        .route(
            "/api/v1/employees",
            post(employees::handle_create_employee).get(employees::handle_list_employees),
        )
        .route("/api/v1/employees/:id", get(employees::handle_get_employee))
        .route(
            "/api/v1/analytics/dashboard",
            get(employees::handle_dashboard),
        )
        // Assessment API
        .route(
            "/api/v1/assess/skill-rating",
            post(assessment::handle_skill_rating),
        )
        .route(
            "/api/v1/recommendations/jobs",
            post(assessment::handle_recommend_jobs),
        )
        // Prediction API
        .route(
            "/api/v1/predict/retention",
            post(predictors::handle_predict_retention),
        )
        .route(
            "/api/v1/predict/salary",
            post(predictors::handle_predict_salary),
        )
        .route(
            "/api/v1/predict/role",
            post(predictors::handle_predict_role),
        )
        .with_state(state)
}
