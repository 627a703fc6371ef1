//! Role and skill reference data. Loaded once at startup, never mutated.

pub mod builtin;
pub mod handlers;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Taxonomy bucket a skill belongs to. Every skill maps to exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SkillCategory {
    Technical,
    Analytical,
    Management,
    Design,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Analytical,
        SkillCategory::Management,
        SkillCategory::Design,
    ];
}

/// An open role: weighted required skills, salary band, experience floor.
/// Skill weights are relative importance in (0, 1]; they are renormalized
/// wherever they are summed, so they need not add up to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    pub required_skills: BTreeMap<String, f64>,
    pub salary_min: f64,
    pub salary_max: f64,
    pub min_experience: f64,
}

impl RoleDefinition {
    pub fn salary_midpoint(&self) -> f64 {
        (self.salary_min + self.salary_max) / 2.0
    }
}

/// Read-only snapshot of all role definitions and the skill taxonomy.
/// Shared across requests as `Arc<Catalog>`; scoring never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    skills: BTreeMap<String, SkillCategory>,
    roles: Vec<RoleDefinition>,
}

impl Catalog {
    pub fn new(
        skills: BTreeMap<String, SkillCategory>,
        roles: Vec<RoleDefinition>,
    ) -> Result<Self, AppError> {
        let catalog = Catalog { skills, roles };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file and validates it.
    pub fn from_json_file(path: &str) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Configuration(format!("cannot read catalog {path}: {e}")))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .map_err(|e| AppError::Configuration(format!("invalid catalog {path}: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn skills(&self) -> impl Iterator<Item = (&str, SkillCategory)> {
        self.skills.iter().map(|(name, cat)| (name.as_str(), *cat))
    }

    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.skills.get(skill).copied()
    }

    pub fn contains_skill(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    /// Structural validation, run once at load time. Scoring assumes a
    /// validated catalog and never re-checks these invariants.
    fn validate(&self) -> Result<(), AppError> {
        let mut seen = std::collections::BTreeSet::new();
        for role in &self.roles {
            if role.name.trim().is_empty() {
                return Err(AppError::Configuration("role with empty name".to_string()));
            }
            if !seen.insert(role.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "duplicate role name '{}'",
                    role.name
                )));
            }
            if !(role.salary_min >= 0.0 && role.salary_max >= role.salary_min) {
                return Err(AppError::Configuration(format!(
                    "role '{}' has an invalid salary range ({}, {})",
                    role.name, role.salary_min, role.salary_max
                )));
            }
            if !(role.min_experience >= 0.0 && role.min_experience.is_finite()) {
                return Err(AppError::Configuration(format!(
                    "role '{}' has an invalid minimum experience {}",
                    role.name, role.min_experience
                )));
            }
            for (skill, weight) in &role.required_skills {
                if !(*weight > 0.0 && *weight <= 1.0) {
                    return Err(AppError::Configuration(format!(
                        "role '{}' skill '{skill}' weight {weight} outside (0, 1]",
                        role.name
                    )));
                }
                if !self.skills.contains_key(skill) {
                    return Err(AppError::Configuration(format!(
                        "role '{}' requires unknown skill '{skill}'",
                        role.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> BTreeMap<String, SkillCategory> {
        [
            ("Python".to_string(), SkillCategory::Technical),
            ("Statistics".to_string(), SkillCategory::Analytical),
        ]
        .into_iter()
        .collect()
    }

    fn role(name: &str, skills: &[(&str, f64)]) -> RoleDefinition {
        RoleDefinition {
            name: name.to_string(),
            required_skills: skills
                .iter()
                .map(|(s, w)| (s.to_string(), *w))
                .collect(),
            salary_min: 50_000.0,
            salary_max: 100_000.0,
            min_experience: 2.0,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin::builtin_catalog().unwrap();
        assert!(!catalog.roles().is_empty());
        assert!(catalog.contains_skill("Python"));
    }

    #[test]
    fn test_builtin_catalog_covers_all_categories() {
        let catalog = builtin::builtin_catalog().unwrap();
        for category in SkillCategory::ALL {
            assert!(
                catalog.skills().any(|(_, c)| c == category),
                "no skills in {category:?}"
            );
        }
    }

    #[test]
    fn test_category_lookup() {
        let catalog = Catalog::new(taxonomy(), vec![]).unwrap();
        assert_eq!(catalog.category_of("Python"), Some(SkillCategory::Technical));
        assert_eq!(catalog.category_of("Juggling"), None);
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let roles = vec![role("Data Scientist", &[]), role("Data Scientist", &[])];
        let err = Catalog::new(taxonomy(), roles).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_inverted_salary_range_rejected() {
        let mut bad = role("Data Scientist", &[]);
        bad.salary_min = 120_000.0;
        bad.salary_max = 90_000.0;
        assert!(Catalog::new(taxonomy(), vec![bad]).is_err());
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let bad = role("Data Scientist", &[("Python", 1.5)]);
        assert!(Catalog::new(taxonomy(), vec![bad]).is_err());
        let bad = role("Data Scientist", &[("Python", 0.0)]);
        assert!(Catalog::new(taxonomy(), vec![bad]).is_err());
    }

    #[test]
    fn test_unknown_required_skill_rejected() {
        let bad = role("Data Scientist", &[("Juggling", 0.5)]);
        let err = Catalog::new(taxonomy(), vec![bad]).unwrap_err();
        assert!(err.to_string().contains("unknown skill"));
    }

    #[test]
    fn test_role_with_no_required_skills_is_allowed() {
        // Degenerate but tolerated: such a role simply scores 0 on skill fit.
        assert!(Catalog::new(taxonomy(), vec![role("Data Scientist", &[])]).is_ok());
    }

    #[test]
    fn test_salary_midpoint() {
        let r = role("Data Scientist", &[]);
        assert_eq!(r.salary_midpoint(), 75_000.0);
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let catalog = builtin::builtin_catalog().unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.roles().len(), catalog.roles().len());
    }
}
