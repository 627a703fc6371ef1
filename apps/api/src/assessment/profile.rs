//! Profile Normalizer: converts a raw employee/candidate record into a
//! validated `Profile`. All range checks and default-filling live here, so
//! rating and matching never special-case missing fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::AppError;

/// Performance rating used when the record omits one. Population mean of
/// the reference dataset on the 1-5 scale; fixed rather than recomputed so
/// normalization stays a pure function.
pub const DEFAULT_PERFORMANCE_RATING: f64 = 3.0;

pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 80;
pub const MAX_EXPERIENCE_YEARS: f64 = 60.0;

/// Number of entries in `Profile::feature_vector`.
pub const FEATURE_DIM: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School", alias = "HighSchool")]
    HighSchool,
    Bachelors,
    Masters,
    PhD,
}

impl EducationLevel {
    /// Ordinal encoding used by the feature vector and the education-fit
    /// lookup: High School 0, Bachelors 1, Masters 2, PhD 3.
    pub fn rank(self) -> u8 {
        match self {
            EducationLevel::HighSchool => 0,
            EducationLevel::Bachelors => 1,
            EducationLevel::Masters => 2,
            EducationLevel::PhD => 3,
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelors => "Bachelors",
            EducationLevel::Masters => "Masters",
            EducationLevel::PhD => "PhD",
        };
        f.write_str(label)
    }
}

/// Raw record as it arrives from the API. Unknown fields are rejected at
/// the serde boundary; range and catalog checks happen in `normalize`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProfile {
    pub age: u32,
    pub education_level: EducationLevel,
    pub years_experience: f64,
    #[serde(default)]
    pub current_role: Option<String>,
    #[serde(default)]
    pub performance_rating: Option<f64>,
    #[serde(default)]
    pub tenure_months: Option<u32>,
    #[serde(default)]
    pub salary: Option<f64>,
    /// Skill name -> declared proficiency on the 1-10 scale.
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
}

/// Canonical, validated profile. Immutable within a scoring call.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub age: u32,
    pub education_level: EducationLevel,
    pub years_experience: f64,
    pub current_role: Option<String>,
    pub performance_rating: f64,
    pub tenure_months: u32,
    pub salary: f64,
    pub skills: BTreeMap<String, f64>,
}

impl Profile {
    /// Fixed-order numeric encoding consumed by the statistical predictors:
    /// [age, education rank, years experience, performance rating,
    /// tenure months, salary].
    pub fn feature_vector(&self) -> [f64; FEATURE_DIM] {
        [
            self.age as f64,
            self.education_level.rank() as f64,
            self.years_experience,
            self.performance_rating,
            self.tenure_months as f64,
            self.salary,
        ]
    }
}

/// Validates a raw record against the catalog and fills defaults.
/// Pure: same input and catalog always produce the same output.
pub fn normalize(raw: RawProfile, catalog: &Catalog) -> Result<Profile, AppError> {
    if !(MIN_AGE..=MAX_AGE).contains(&raw.age) {
        return Err(AppError::Validation(format!(
            "age {} outside [{MIN_AGE}, {MAX_AGE}]",
            raw.age
        )));
    }

    if !(raw.years_experience.is_finite()
        && (0.0..=MAX_EXPERIENCE_YEARS).contains(&raw.years_experience))
    {
        return Err(AppError::Validation(format!(
            "years_experience {} outside [0, {MAX_EXPERIENCE_YEARS}]",
            raw.years_experience
        )));
    }

    let performance_rating = match raw.performance_rating {
        Some(p) => {
            if !(p.is_finite() && (1.0..=5.0).contains(&p)) {
                return Err(AppError::Validation(format!(
                    "performance_rating {p} outside [1, 5]"
                )));
            }
            p
        }
        None => DEFAULT_PERFORMANCE_RATING,
    };

    let salary = match raw.salary {
        Some(s) => {
            if !(s.is_finite() && s >= 0.0) {
                return Err(AppError::Validation(format!("salary {s} must be >= 0")));
            }
            s
        }
        None => 0.0,
    };

    if let Some(role) = &raw.current_role {
        if catalog.role(role).is_none() {
            return Err(AppError::Validation(format!(
                "current_role '{role}' is not a known role"
            )));
        }
    }

    for (skill, proficiency) in &raw.skills {
        if !catalog.contains_skill(skill) {
            return Err(AppError::Validation(format!(
                "skill '{skill}' is not in the taxonomy"
            )));
        }
        if !(proficiency.is_finite() && (1.0..=10.0).contains(proficiency)) {
            return Err(AppError::Validation(format!(
                "proficiency {proficiency} for '{skill}' outside [1, 10]"
            )));
        }
    }

    Ok(Profile {
        age: raw.age,
        education_level: raw.education_level,
        years_experience: raw.years_experience,
        current_role: raw.current_role,
        performance_rating,
        tenure_months: raw.tenure_months.unwrap_or(0),
        salary,
        skills: raw.skills,
    })
}
