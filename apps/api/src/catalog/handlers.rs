//! Axum route handlers exposing the catalog reference data.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::assessment::matching::required_education;
use crate::state::AppState;

use super::SkillCategory;

#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub title: String,
    pub min_salary: f64,
    pub max_salary: f64,
    pub min_experience: f64,
    pub required_education: String,
    pub required_skills: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub category: SkillCategory,
}

/// GET /api/v1/catalog/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    let roles = state
        .catalog
        .roles()
        .iter()
        .map(|role| RoleSummary {
            title: role.name.clone(),
            min_salary: role.salary_min,
            max_salary: role.salary_max,
            min_experience: role.min_experience,
            required_education: required_education(role).to_string(),
            required_skills: role.required_skills.clone(),
        })
        .collect();
    Json(roles)
}

/// GET /api/v1/catalog/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<Vec<SkillSummary>> {
    let skills = state
        .catalog
        .skills()
        .map(|(name, category)| SkillSummary {
            name: name.to_string(),
            category,
        })
        .collect();
    Json(skills)
}
