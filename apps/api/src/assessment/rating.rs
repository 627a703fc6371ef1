//! Skill Rating Engine: one 1-10 rating per skill category plus an overall
//! rating. Categories with no declared skills fall back to an experience
//! and performance derived baseline, so the output is always fully defined
//! no matter how sparse the profile is.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, SkillCategory};

use super::profile::Profile;

/// Share of the category rating taken from declared proficiencies; the
/// remainder comes from the baseline prior.
const DECLARED_SHARE: f64 = 0.6;
const BASELINE_SHARE: f64 = 0.4;

/// Coarse label over the overall rating, used by the assessment endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProficiencyBand {
    Beginner,
    Intermediate,
    Proficient,
    Expert,
}

impl ProficiencyBand {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 8.0 {
            ProficiencyBand::Expert
        } else if rating >= 6.0 {
            ProficiencyBand::Proficient
        } else if rating >= 4.0 {
            ProficiencyBand::Intermediate
        } else {
            ProficiencyBand::Beginner
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProficiencyBand::Beginner => "Beginner",
            ProficiencyBand::Intermediate => "Intermediate",
            ProficiencyBand::Proficient => "Proficient",
            ProficiencyBand::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillRatingResult {
    pub category_ratings: BTreeMap<SkillCategory, f64>,
    /// Mean of the category ratings, rounded to one decimal.
    pub overall_rating: f64,
    pub band: ProficiencyBand,
}

/// Experience/performance prior used to fill categories with no declared
/// skills: `clamp(1, 10, 2 + 0.4*years + 1.2*performance)`.
pub fn baseline_rating(years_experience: f64, performance_rating: f64) -> f64 {
    (2.0 + 0.4 * years_experience + 1.2 * performance_rating).clamp(1.0, 10.0)
}

/// Rates a validated profile across all skill categories. Never fails:
/// empty or lopsided skill sets degrade to the baseline.
pub fn rate_skills(profile: &Profile, catalog: &Catalog) -> SkillRatingResult {
    let baseline = baseline_rating(profile.years_experience, profile.performance_rating);

    let mut by_category: BTreeMap<SkillCategory, Vec<f64>> = BTreeMap::new();
    for (skill, proficiency) in &profile.skills {
        if let Some(category) = catalog.category_of(skill) {
            by_category.entry(category).or_default().push(*proficiency);
        }
    }

    let mut category_ratings = BTreeMap::new();
    for category in SkillCategory::ALL {
        let rating = match by_category.get(&category) {
            Some(declared) if !declared.is_empty() => {
                let mean = declared.iter().sum::<f64>() / declared.len() as f64;
                DECLARED_SHARE * mean + BASELINE_SHARE * baseline
            }
            _ => baseline,
        };
        category_ratings.insert(category, rating);
    }

    let overall = category_ratings.values().sum::<f64>() / category_ratings.len() as f64;
    let overall_rating = round1(overall);

    SkillRatingResult {
        category_ratings,
        overall_rating,
        band: ProficiencyBand::from_rating(overall_rating),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::profile::EducationLevel;
    use crate::catalog::builtin::builtin_catalog;
    use std::collections::BTreeMap;

    fn profile(years: f64, performance: f64, skills: &[(&str, f64)]) -> Profile {
        Profile {
            age: 30,
            education_level: EducationLevel::Bachelors,
            years_experience: years,
            current_role: None,
            performance_rating: performance,
            tenure_months: 12,
            salary: 80_000.0,
            skills: skills
                .iter()
                .map(|(s, p)| (s.to_string(), *p))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_baseline_formula() {
        // 2 + 0.4*5 + 1.2*4 = 8.8
        assert!((baseline_rating(5.0, 4.0) - 8.8).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_clamped_to_ten() {
        assert_eq!(baseline_rating(30.0, 5.0), 10.0);
    }

    #[test]
    fn test_baseline_clamped_to_one() {
        // The raw formula cannot go below 3.2 for in-range inputs, so force
        // the clamp with an out-of-range probe.
        assert_eq!(baseline_rating(0.0, -5.0), 1.0);
    }

    #[test]
    fn test_zero_skills_yields_baseline_everywhere() {
        let catalog = builtin_catalog().unwrap();
        let p = profile(3.0, 4.0, &[]);
        let expected = baseline_rating(3.0, 4.0);
        let result = rate_skills(&p, &catalog);
        for (_, rating) in &result.category_ratings {
            assert!((rating - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_declared_category_blends_with_baseline() {
        let catalog = builtin_catalog().unwrap();
        // Python and SQL are Technical: mean 7.0; baseline 2+0.4*2+1.2*3 = 6.4.
        let p = profile(2.0, 3.0, &[("Python", 8.0), ("SQL", 6.0)]);
        let result = rate_skills(&p, &catalog);
        let technical = result.category_ratings[&SkillCategory::Technical];
        let expected = 0.6 * 7.0 + 0.4 * 6.4;
        assert!((technical - expected).abs() < 1e-9);
    }

    #[test]
    fn test_undeclared_categories_fall_back_to_baseline() {
        let catalog = builtin_catalog().unwrap();
        let p = profile(2.0, 3.0, &[("Python", 8.0)]);
        let result = rate_skills(&p, &catalog);
        let baseline = baseline_rating(2.0, 3.0);
        assert!((result.category_ratings[&SkillCategory::Design] - baseline).abs() < 1e-9);
        assert!((result.category_ratings[&SkillCategory::Management] - baseline).abs() < 1e-9);
    }

    #[test]
    fn test_all_ratings_within_bounds() {
        let catalog = builtin_catalog().unwrap();
        for (years, performance) in [(0.0, 1.0), (0.0, 5.0), (25.0, 1.0), (40.0, 5.0)] {
            let p = profile(years, performance, &[("Figma", 10.0), ("Excel", 1.0)]);
            let result = rate_skills(&p, &catalog);
            for (_, rating) in &result.category_ratings {
                assert!((1.0..=10.0).contains(rating), "rating {rating} out of bounds");
            }
            assert!((1.0..=10.0).contains(&result.overall_rating));
        }
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        let catalog = builtin_catalog().unwrap();
        let p = profile(3.0, 4.0, &[]);
        let result = rate_skills(&p, &catalog);
        // All categories equal the baseline, so the overall equals it too.
        let expected = (baseline_rating(3.0, 4.0) * 10.0).round() / 10.0;
        assert_eq!(result.overall_rating, expected);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ProficiencyBand::from_rating(8.0), ProficiencyBand::Expert);
        assert_eq!(
            ProficiencyBand::from_rating(6.5),
            ProficiencyBand::Proficient
        );
        assert_eq!(
            ProficiencyBand::from_rating(4.0),
            ProficiencyBand::Intermediate
        );
        assert_eq!(ProficiencyBand::from_rating(3.9), ProficiencyBand::Beginner);
    }

    #[test]
    fn test_four_categories_always_present() {
        let catalog = builtin_catalog().unwrap();
        let result = rate_skills(&profile(1.0, 2.0, &[]), &catalog);
        assert_eq!(result.category_ratings.len(), 4);
    }
}
