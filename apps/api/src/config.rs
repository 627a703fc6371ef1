use anyhow::{Context, Result};

use crate::assessment::matching::MatchWeights;

/// Application configuration loaded from environment variables.
/// Every variable has a sensible default so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding serialized predictor coefficient files.
    /// Missing files disable the corresponding /predict endpoints (503).
    pub model_dir: String,
    /// Optional JSON catalog override. When unset the built-in catalog is used.
    pub catalog_path: Option<String>,
    /// Match factor weights, overridable via environment.
    pub match_weights: MatchWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("WORKFORCE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://workforce.db?mode=rwc".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            model_dir: std::env::var("WORKFORCE_MODEL_DIR")
                .unwrap_or_else(|_| "models".to_string()),
            catalog_path: std::env::var("WORKFORCE_CATALOG_PATH").ok(),
            match_weights: MatchWeights {
                skills: env_weight("WORKFORCE_SKILL_WEIGHT", MatchWeights::default().skills)?,
                experience: env_weight(
                    "WORKFORCE_EXPERIENCE_WEIGHT",
                    MatchWeights::default().experience,
                )?,
                education: env_weight(
                    "WORKFORCE_EDUCATION_WEIGHT",
                    MatchWeights::default().education,
                )?,
            },
        })
    }
}

fn env_weight(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
