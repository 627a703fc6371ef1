//! Built-in default catalog: 14 roles across engineering, data, product,
//! and design, with a 34-skill taxonomy. Deployments that need different
//! reference data point `WORKFORCE_CATALOG_PATH` at a JSON file instead.

use std::collections::BTreeMap;

use crate::errors::AppError;

use super::{Catalog, RoleDefinition, SkillCategory};

const TECHNICAL: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "SQL",
    "MongoDB",
    "React",
    "Angular",
    "Node.js",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
];

const ANALYTICAL: &[&str] = &[
    "Data Analysis",
    "Statistics",
    "Machine Learning",
    "Deep Learning",
    "Business Intelligence",
    "Excel",
    "Tableau",
    "Power BI",
];

const MANAGEMENT: &[&str] = &[
    "Project Management",
    "Team Leadership",
    "Agile",
    "Scrum",
    "Communication",
    "Strategic Planning",
];

const DESIGN: &[&str] = &[
    "UI Design",
    "UX Research",
    "Figma",
    "Adobe Creative Suite",
    "Prototyping",
    "User Testing",
];

pub fn builtin_catalog() -> Result<Catalog, AppError> {
    let mut skills = BTreeMap::new();
    for (names, category) in [
        (TECHNICAL, SkillCategory::Technical),
        (ANALYTICAL, SkillCategory::Analytical),
        (MANAGEMENT, SkillCategory::Management),
        (DESIGN, SkillCategory::Design),
    ] {
        for name in names {
            skills.insert(name.to_string(), category);
        }
    }

    // Salary bands in dollars; minimum experience in years.
    let roles = vec![
        role(
            "Software Engineer",
            50_000.0,
            120_000.0,
            2.0,
            &[
                ("Python", 0.8),
                ("JavaScript", 0.6),
                ("SQL", 0.5),
                ("Docker", 0.3),
            ],
        ),
        role(
            "Data Scientist",
            70_000.0,
            150_000.0,
            3.0,
            &[
                ("Python", 0.8),
                ("Machine Learning", 0.7),
                ("Statistics", 0.6),
                ("SQL", 0.5),
            ],
        ),
        role(
            "Product Manager",
            80_000.0,
            160_000.0,
            4.0,
            &[
                ("Project Management", 0.9),
                ("Communication", 0.7),
                ("Strategic Planning", 0.6),
                ("Agile", 0.4),
            ],
        ),
        role(
            "DevOps Engineer",
            60_000.0,
            130_000.0,
            2.0,
            &[
                ("Docker", 0.9),
                ("Kubernetes", 0.8),
                ("AWS", 0.7),
                ("Python", 0.4),
            ],
        ),
        role(
            "UI/UX Designer",
            45_000.0,
            100_000.0,
            1.0,
            &[
                ("UI Design", 0.9),
                ("Figma", 0.8),
                ("Prototyping", 0.6),
                ("UX Research", 0.5),
                ("User Testing", 0.4),
            ],
        ),
        role(
            "QA Engineer",
            40_000.0,
            90_000.0,
            1.0,
            &[("Python", 0.6), ("SQL", 0.5), ("JavaScript", 0.4)],
        ),
        role(
            "Business Analyst",
            50_000.0,
            110_000.0,
            2.0,
            &[
                ("Data Analysis", 0.8),
                ("Business Intelligence", 0.6),
                ("Excel", 0.6),
                ("SQL", 0.5),
                ("Communication", 0.5),
            ],
        ),
        role(
            "Technical Lead",
            90_000.0,
            180_000.0,
            6.0,
            &[
                ("Team Leadership", 0.8),
                ("Python", 0.6),
                ("Communication", 0.6),
                ("Agile", 0.5),
                ("Strategic Planning", 0.4),
            ],
        ),
        role(
            "System Administrator",
            45_000.0,
            95_000.0,
            2.0,
            &[("Docker", 0.6), ("AWS", 0.5), ("SQL", 0.4)],
        ),
        role(
            "Frontend Developer",
            45_000.0,
            105_000.0,
            1.0,
            &[
                ("JavaScript", 0.9),
                ("React", 0.8),
                ("Angular", 0.4),
                ("UI Design", 0.3),
            ],
        ),
        role(
            "Backend Developer",
            55_000.0,
            125_000.0,
            2.0,
            &[
                ("Python", 0.7),
                ("SQL", 0.7),
                ("Node.js", 0.5),
                ("MongoDB", 0.4),
                ("Docker", 0.4),
            ],
        ),
        role(
            "Machine Learning Engineer",
            80_000.0,
            170_000.0,
            3.0,
            &[
                ("Python", 0.9),
                ("Machine Learning", 0.9),
                ("Deep Learning", 0.7),
                ("Statistics", 0.5),
                ("AWS", 0.4),
            ],
        ),
        role(
            "Cybersecurity Analyst",
            65_000.0,
            140_000.0,
            3.0,
            &[("Python", 0.6), ("Data Analysis", 0.5), ("AWS", 0.4)],
        ),
        role(
            "Database Administrator",
            55_000.0,
            115_000.0,
            3.0,
            &[("SQL", 0.9), ("MongoDB", 0.5), ("Python", 0.4)],
        ),
    ];

    Catalog::new(skills, roles)
}

fn role(
    name: &str,
    salary_min: f64,
    salary_max: f64,
    min_experience: f64,
    required: &[(&str, f64)],
) -> RoleDefinition {
    RoleDefinition {
        name: name.to_string(),
        required_skills: required
            .iter()
            .map(|(skill, weight)| (skill.to_string(), *weight))
            .collect(),
        salary_min,
        salary_max,
        min_experience,
    }
}
