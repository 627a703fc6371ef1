//! Axum route handlers for the employee API and the analytics dashboard.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assessment::profile::{normalize, RawProfile};
use crate::catalog::SkillCategory;
use crate::errors::AppError;
use crate::state::AppState;

use super::{dashboard_stats, get_employee, insert_employee, list_employees, EmployeeRow};

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

// ----------------------------------------------------------------------------
// Request / Response types
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub profile: RawProfile,
}

#[derive(Debug, Serialize)]
pub struct CreateEmployeeResponse {
    pub id: String,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: super::DashboardStats,
    pub available_roles: usize,
    pub skill_categories: usize,
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

/// POST /api/v1/employees
pub async fn handle_create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<CreateEmployeeResponse>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    let profile = normalize(request.profile, &state.catalog)?;
    let id = insert_employee(&state.db, &request.name, &request.email, &profile).await?;

    Ok(Json(CreateEmployeeResponse {
        id,
        message: "Employee created successfully",
    }))
}

/// GET /api/v1/employees?limit=N&offset=M
pub async fn handle_list_employees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EmployeeRow>>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let employees = list_employees(&state.db, limit, offset).await?;
    Ok(Json(employees))
}

/// GET /api/v1/employees/:id
pub async fn handle_get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeRow>, AppError> {
    match get_employee(&state.db, &id).await? {
        Some(employee) => Ok(Json(employee)),
        None => Err(AppError::NotFound(format!("employee {id} not found"))),
    }
}

/// GET /api/v1/analytics/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = dashboard_stats(&state.db).await?;

    Ok(Json(DashboardResponse {
        stats,
        available_roles: state.catalog.roles().len(),
        skill_categories: SkillCategory::ALL.len(),
    }))
}
