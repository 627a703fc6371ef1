//! Job Match Engine: scores a validated profile against every role in the
//! catalog with a weighted multi-factor formula (skills, experience,
//! education) and returns a ranked list with salary estimates and skill
//! gaps.

use serde::Serialize;

use crate::catalog::{Catalog, RoleDefinition};

use super::profile::{EducationLevel, Profile, FEATURE_DIM};

/// Required skills lighter than this are not reported as gaps.
pub const GAP_WEIGHT_THRESHOLD: f64 = 0.3;

/// Salary band midpoints at or above these thresholds imply a minimum
/// education for the role.
const MASTERS_MIDPOINT: f64 = 125_000.0;
const BACHELORS_MIDPOINT: f64 = 75_000.0;

/// Relative weights of the three match factors. Overridable per deployment.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub gap_weight_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            gap_weight_threshold: GAP_WEIGHT_THRESHOLD,
        }
    }
}

/// Pluggable salary estimator supplied by the statistical predictors.
/// When none is given, the arithmetic band estimate is used unconditionally.
pub trait SalaryEstimator: Send + Sync {
    fn estimate(&self, features: &[f64; FEATURE_DIM]) -> f64;
}

/// A required skill the profile does not declare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGap {
    pub skill: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub role: String,
    /// Overall compatibility in [0, 100], one decimal.
    pub score: f64,
    pub estimated_salary: f64,
    /// Material missing skills, heaviest first.
    pub skill_gaps: Vec<SkillGap>,
    pub recommendation: String,
}

/// Scores the profile against every catalog role and ranks the results:
/// score descending, then estimated salary descending, then role name.
/// An empty catalog yields an empty vec. `top_n` truncates after ranking.
pub fn match_jobs(
    profile: &Profile,
    catalog: &Catalog,
    config: &MatchConfig,
    estimator: Option<&dyn SalaryEstimator>,
    top_n: Option<usize>,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = catalog
        .roles()
        .iter()
        .map(|role| score_role(profile, role, config, estimator))
        .collect();

    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.estimated_salary.total_cmp(&a.estimated_salary))
            .then_with(|| a.role.cmp(&b.role))
    });

    if let Some(n) = top_n {
        results.truncate(n);
    }
    results
}

fn score_role(
    profile: &Profile,
    role: &RoleDefinition,
    config: &MatchConfig,
    estimator: Option<&dyn SalaryEstimator>,
) -> MatchResult {
    let skills = skill_fit(profile, role);
    let experience = experience_fit(profile.years_experience, role.min_experience);
    let education = education_fit(profile.education_level, required_education(role));

    let weights = config.weights;
    let score = round1(
        (weights.skills * skills + weights.experience * experience + weights.education * education)
            .clamp(0.0, 100.0),
    );

    let estimated_salary = estimate_salary(profile, role, estimator);
    let skill_gaps = skill_gaps(profile, role, config.gap_weight_threshold);
    let recommendation = build_recommendation(profile, score, &skill_gaps);

    MatchResult {
        role: role.name.clone(),
        score,
        estimated_salary,
        skill_gaps,
        recommendation,
    }
}

/// Weight-normalized proficiency coverage of the role's required skills,
/// scaled to [0, 100]. Undeclared skills count as zero proficiency. A role
/// whose weights sum to zero scores 0 instead of failing the whole batch.
pub fn skill_fit(profile: &Profile, role: &RoleDefinition) -> f64 {
    let total_weight: f64 = role.required_skills.values().sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let covered: f64 = role
        .required_skills
        .iter()
        .map(|(skill, weight)| {
            let proficiency = profile.skills.get(skill).copied().unwrap_or(0.0);
            (proficiency / 10.0) * (weight / total_weight)
        })
        .sum();

    covered * 100.0
}

/// 100 at or above the role minimum, linearly down to 0 at zero experience.
/// A role with no experience floor is always fully satisfied.
pub fn experience_fit(years_experience: f64, min_experience: f64) -> f64 {
    if min_experience <= 0.0 || years_experience >= min_experience {
        return 100.0;
    }
    (100.0 * years_experience / min_experience).max(0.0)
}

/// The education a role implicitly expects, derived from its salary band.
pub fn required_education(role: &RoleDefinition) -> EducationLevel {
    let midpoint = role.salary_midpoint();
    if midpoint >= MASTERS_MIDPOINT {
        EducationLevel::Masters
    } else if midpoint >= BACHELORS_MIDPOINT {
        EducationLevel::Bachelors
    } else {
        EducationLevel::HighSchool
    }
}

/// Fixed lookup: exact match 100, any overqualification 75, one level
/// short 50, further short 25.
pub fn education_fit(actual: EducationLevel, required: EducationLevel) -> f64 {
    let delta = actual.rank() as i32 - required.rank() as i32;
    match delta {
        0 => 100.0,
        d if d > 0 => 75.0,
        -1 => 50.0,
        _ => 25.0,
    }
}

/// Band midpoint adjusted by performance, clamped to the band. An external
/// estimator replaces the arithmetic estimate but is clamped the same way
/// so the band invariant holds for both paths.
fn estimate_salary(
    profile: &Profile,
    role: &RoleDefinition,
    estimator: Option<&dyn SalaryEstimator>,
) -> f64 {
    let raw = match estimator {
        Some(model) => model.estimate(&profile.feature_vector()),
        None => role.salary_midpoint() * (0.9 + 0.04 * profile.performance_rating),
    };
    raw.clamp(role.salary_min, role.salary_max)
}

fn skill_gaps(profile: &Profile, role: &RoleDefinition, threshold: f64) -> Vec<SkillGap> {
    let mut gaps: Vec<SkillGap> = role
        .required_skills
        .iter()
        .filter(|(skill, weight)| **weight > threshold && !profile.skills.contains_key(*skill))
        .map(|(skill, weight)| SkillGap {
            skill: skill.clone(),
            weight: *weight,
        })
        .collect();

    gaps.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.skill.cmp(&b.skill)));
    gaps
}

fn build_recommendation(profile: &Profile, score: f64, gaps: &[SkillGap]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.skill.as_str()).collect();

    if score >= 80.0 {
        format!(
            "Excellent match. {:.0} years of experience and a {:.1}/5 performance rating make this a strong fit.",
            profile.years_experience, profile.performance_rating
        )
    } else if score >= 60.0 {
        format!(
            "Good match ({score}/100). {:.0} years of experience meet most requirements for this role.",
            profile.years_experience
        )
    } else if top_gaps.is_empty() {
        format!("Growth opportunity ({score}/100) given the current profile.")
    } else {
        format!(
            "Growth opportunity ({score}/100). Consider developing: {}.",
            top_gaps.join(", ")
        )
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SkillCategory};
    use std::collections::BTreeMap;

    fn taxonomy() -> BTreeMap<String, SkillCategory> {
        [
            ("Python".to_string(), SkillCategory::Technical),
            ("SQL".to_string(), SkillCategory::Technical),
            ("Statistics".to_string(), SkillCategory::Analytical),
            ("Communication".to_string(), SkillCategory::Management),
        ]
        .into_iter()
        .collect()
    }

    fn role(
        name: &str,
        skills: &[(&str, f64)],
        salary: (f64, f64),
        min_experience: f64,
    ) -> RoleDefinition {
        RoleDefinition {
            name: name.to_string(),
            required_skills: skills
                .iter()
                .map(|(s, w)| (s.to_string(), *w))
                .collect(),
            salary_min: salary.0,
            salary_max: salary.1,
            min_experience,
        }
    }

    fn profile(years: f64, performance: f64, skills: &[(&str, f64)]) -> Profile {
        Profile {
            age: 30,
            education_level: EducationLevel::Bachelors,
            years_experience: years,
            current_role: None,
            performance_rating: performance,
            tenure_months: 12,
            salary: 80_000.0,
            skills: skills.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
        }
    }

    fn data_scientist() -> RoleDefinition {
        role(
            "Data Scientist",
            &[("Python", 0.6), ("Statistics", 0.4)],
            (90_000.0, 130_000.0),
            3.0,
        )
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((MatchWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_worked_example_skill_and_experience_fit() {
        let p = profile(5.0, 4.0, &[("Python", 8.0), ("SQL", 6.0)]);
        let ds = data_scientist();

        assert!((skill_fit(&p, &ds) - 48.0).abs() < 1e-9);
        assert_eq!(experience_fit(p.years_experience, ds.min_experience), 100.0);
    }

    #[test]
    fn test_worked_example_gaps() {
        let p = profile(5.0, 4.0, &[("Python", 8.0), ("SQL", 6.0)]);
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        assert_eq!(
            results[0].skill_gaps,
            vec![SkillGap {
                skill: "Statistics".to_string(),
                weight: 0.4
            }]
        );
    }

    #[test]
    fn test_full_proficiency_scores_hundred_skill_fit() {
        let p = profile(5.0, 4.0, &[("Python", 10.0), ("Statistics", 10.0)]);
        assert!((skill_fit(&p, &data_scientist()) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_sum_scores_zero_not_panic() {
        let p = profile(5.0, 4.0, &[("Python", 10.0)]);
        let empty = role("Empty Role", &[], (50_000.0, 60_000.0), 0.0);
        assert_eq!(skill_fit(&p, &empty), 0.0);
    }

    #[test]
    fn test_experience_fit_scales_linearly_below_minimum() {
        assert!((experience_fit(1.5, 3.0) - 50.0).abs() < 1e-9);
        assert_eq!(experience_fit(0.0, 3.0), 0.0);
        assert_eq!(experience_fit(3.0, 3.0), 100.0);
        assert_eq!(experience_fit(0.0, 0.0), 100.0);
    }

    #[test]
    fn test_required_education_tiers() {
        let senior = role("A", &[], (100_000.0, 160_000.0), 0.0); // midpoint 130k
        let mid = role("B", &[], (60_000.0, 100_000.0), 0.0); // midpoint 80k
        let entry = role("C", &[], (40_000.0, 90_000.0), 0.0); // midpoint 65k
        assert_eq!(required_education(&senior), EducationLevel::Masters);
        assert_eq!(required_education(&mid), EducationLevel::Bachelors);
        assert_eq!(required_education(&entry), EducationLevel::HighSchool);
    }

    #[test]
    fn test_education_fit_lookup() {
        use EducationLevel::*;
        assert_eq!(education_fit(Bachelors, Bachelors), 100.0);
        assert_eq!(education_fit(PhD, Bachelors), 75.0);
        assert_eq!(education_fit(Masters, Bachelors), 75.0);
        assert_eq!(education_fit(HighSchool, Bachelors), 50.0);
        assert_eq!(education_fit(HighSchool, Masters), 25.0);
        assert_eq!(education_fit(Bachelors, PhD), 25.0);
    }

    #[test]
    fn test_overall_score_for_worked_example() {
        // 0.5*48 + 0.3*100 + 0.2*100 (Bachelors vs 110k midpoint) = 74.0
        let p = profile(5.0, 4.0, &[("Python", 8.0), ("SQL", 6.0)]);
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        assert_eq!(results[0].score, 74.0);
    }

    #[test]
    fn test_estimated_salary_stays_in_band_for_all_performance() {
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        for tenths in 10..=50 {
            let p = profile(5.0, tenths as f64 / 10.0, &[]);
            let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
            let salary = results[0].estimated_salary;
            assert!(
                (90_000.0..=130_000.0).contains(&salary),
                "salary {salary} escaped the band"
            );
        }
    }

    #[test]
    fn test_results_sorted_non_increasing() {
        let catalog = crate::catalog::builtin::builtin_catalog().unwrap();
        let p = profile(4.0, 4.0, &[("Python", 9.0), ("SQL", 7.0)]);
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        assert_eq!(results.len(), catalog.roles().len());
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_tie_breaks_are_deterministic() {
        // Two identical roles except salary band: equal score, richer first.
        let a = role("Aardvark Analyst", &[("Python", 0.5)], (80_000.0, 100_000.0), 0.0);
        let b = role("Zebra Analyst", &[("Python", 0.5)], (90_000.0, 110_000.0), 0.0);
        let catalog = Catalog::new(taxonomy(), vec![a, b]).unwrap();
        let p = profile(5.0, 3.0, &[("Python", 8.0)]);
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].role, "Zebra Analyst");

        // Equal everything: name ascending decides.
        let a = role("Aardvark Analyst", &[("Python", 0.5)], (80_000.0, 100_000.0), 0.0);
        let b = role("Zebra Analyst", &[("Python", 0.5)], (80_000.0, 100_000.0), 0.0);
        let catalog = Catalog::new(taxonomy(), vec![b, a]).unwrap();
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        assert_eq!(results[0].role, "Aardvark Analyst");
    }

    #[test]
    fn test_top_n_truncates_after_ranking() {
        let catalog = crate::catalog::builtin::builtin_catalog().unwrap();
        let p = profile(4.0, 4.0, &[("Python", 9.0)]);
        let all = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        let top = match_jobs(&p, &catalog, &MatchConfig::default(), None, Some(5));
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].role, all[0].role);
        assert_eq!(top[4].role, all[4].role);
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        let catalog = Catalog::new(taxonomy(), vec![]).unwrap();
        let p = profile(4.0, 4.0, &[]);
        assert!(match_jobs(&p, &catalog, &MatchConfig::default(), None, None).is_empty());
    }

    #[test]
    fn test_match_jobs_is_idempotent() {
        let catalog = crate::catalog::builtin::builtin_catalog().unwrap();
        let p = profile(6.0, 4.5, &[("Python", 8.0), ("SQL", 5.0)]);
        let first = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        let second = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        let names_first: Vec<_> = first.iter().map(|r| (&r.role, r.score)).collect();
        let names_second: Vec<_> = second.iter().map(|r| (&r.role, r.score)).collect();
        assert_eq!(names_first, names_second);
    }

    #[test]
    fn test_gap_threshold_filters_light_skills() {
        let r = role(
            "Mixed Role",
            &[("Python", 0.6), ("SQL", 0.3), ("Statistics", 0.31)],
            (50_000.0, 90_000.0),
            0.0,
        );
        let catalog = Catalog::new(taxonomy(), vec![r]).unwrap();
        let p = profile(2.0, 3.0, &[]);
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), None, None);
        let gaps: Vec<&str> = results[0].skill_gaps.iter().map(|g| g.skill.as_str()).collect();
        // SQL sits exactly at the threshold and is excluded; heavier first.
        assert_eq!(gaps, vec!["Python", "Statistics"]);
    }

    struct FixedEstimator(f64);

    impl SalaryEstimator for FixedEstimator {
        fn estimate(&self, _features: &[f64; FEATURE_DIM]) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_external_estimator_replaces_arithmetic_estimate() {
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        let p = profile(5.0, 4.0, &[]);
        let estimator = FixedEstimator(120_000.0);
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), Some(&estimator), None);
        assert_eq!(results[0].estimated_salary, 120_000.0);
    }

    #[test]
    fn test_external_estimate_clamped_to_band() {
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        let p = profile(5.0, 4.0, &[]);
        let estimator = FixedEstimator(500_000.0);
        let results = match_jobs(&p, &catalog, &MatchConfig::default(), Some(&estimator), None);
        assert_eq!(results[0].estimated_salary, 130_000.0);
    }

    #[test]
    fn test_custom_weights_change_score() {
        let catalog = Catalog::new(taxonomy(), vec![data_scientist()]).unwrap();
        let p = profile(5.0, 4.0, &[("Python", 8.0)]);
        let skill_only = MatchConfig {
            weights: MatchWeights {
                skills: 1.0,
                experience: 0.0,
                education: 0.0,
            },
            ..MatchConfig::default()
        };
        let results = match_jobs(&p, &catalog, &skill_only, None, None);
        assert_eq!(results[0].score, 48.0);
    }

    #[test]
    fn test_recommendation_bands() {
        let catalog = crate::catalog::builtin::builtin_catalog().unwrap();
        let strong = profile(
            10.0,
            5.0,
            &[("Python", 10.0), ("SQL", 10.0), ("JavaScript", 10.0), ("Docker", 10.0)],
        );
        let results = match_jobs(&strong, &catalog, &MatchConfig::default(), None, None);
        assert!(results[0].recommendation.contains("Excellent match"));

        let weak = profile(0.0, 1.0, &[]);
        let results = match_jobs(&weak, &catalog, &MatchConfig::default(), None, None);
        let last = results.last().unwrap();
        assert!(last.recommendation.contains("Growth opportunity"));
    }
}
