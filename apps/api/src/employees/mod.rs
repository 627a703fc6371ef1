//! Employee records: SQLite-backed store plus the aggregates behind the
//! analytics dashboard. Queries are runtime-bound; the schema is created
//! at startup by `db::create_pool`.

pub mod handlers;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json as DbJson;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::assessment::profile::Profile;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub education_level: String,
    pub years_experience: f64,
    pub current_role: Option<String>,
    pub performance_rating: f64,
    pub tenure_months: i64,
    pub salary: f64,
    pub skills: DbJson<BTreeMap<String, f64>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub role_distribution: BTreeMap<String, i64>,
    pub average_salary_by_role: BTreeMap<String, f64>,
}

/// Inserts a normalized profile under a fresh id and returns that id.
pub async fn insert_employee(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    profile: &Profile,
) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO employees
            (id, name, email, age, education_level, years_experience,
             current_role, performance_rating, tenure_months, salary,
             skills, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(email)
    .bind(profile.age as i64)
    .bind(profile.education_level.to_string())
    .bind(profile.years_experience)
    .bind(&profile.current_role)
    .bind(profile.performance_rating)
    .bind(profile.tenure_months as i64)
    .bind(profile.salary)
    .bind(DbJson(profile.skills.clone()))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn list_employees(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<EmployeeRow>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeRow>(
        "SELECT * FROM employees ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn get_employee(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<EmployeeRow>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Aggregates for the dashboard. Employees without a current role are
/// grouped under "Unknown".
pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let total_employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;

    let role_rows: Vec<(Option<String>, i64)> =
        sqlx::query_as("SELECT current_role, COUNT(*) FROM employees GROUP BY current_role")
            .fetch_all(pool)
            .await?;
    let role_distribution = role_rows
        .into_iter()
        .map(|(role, count)| (role.unwrap_or_else(|| "Unknown".to_string()), count))
        .collect();

    let salary_rows: Vec<(String, f64)> = sqlx::query_as(
        r#"
        SELECT current_role, AVG(salary)
        FROM employees
        WHERE current_role IS NOT NULL
        GROUP BY current_role
        "#,
    )
    .fetch_all(pool)
    .await?;
    let average_salary_by_role = salary_rows.into_iter().collect();

    Ok(DashboardStats {
        total_employees,
        role_distribution,
        average_salary_by_role,
    })
}
