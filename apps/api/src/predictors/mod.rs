//! Statistical predictor collaborators: retention classifier, salary
//! regressor, role classifier. The core treats them as black boxes over a
//! feature vector; the implementations here evaluate coefficient files
//! fitted offline. Missing files disable the endpoints that need them,
//! which then answer 503.

pub mod handlers;

use std::sync::Arc;

use serde::Deserialize;

use crate::assessment::matching::SalaryEstimator;
use crate::assessment::profile::FEATURE_DIM;
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct RetentionPrediction {
    pub will_leave: bool,
    pub leave_probability: f64,
    pub stay_probability: f64,
}

impl RetentionPrediction {
    pub fn risk_level(&self) -> &'static str {
        if self.leave_probability > 0.7 {
            "High"
        } else if self.leave_probability > 0.4 {
            "Medium"
        } else {
            "Low"
        }
    }
}

#[derive(Debug, Clone)]
pub struct RolePrediction {
    pub role: String,
    pub confidence: f64,
}

impl RolePrediction {
    pub fn confidence_level(&self) -> &'static str {
        if self.confidence > 0.8 {
            "High"
        } else if self.confidence > 0.6 {
            "Medium"
        } else {
            "Low"
        }
    }
}

pub trait RetentionModel: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_DIM]) -> RetentionPrediction;
}

pub trait RoleModel: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_DIM]) -> RolePrediction;
}

/// Binary logistic regression over the profile feature vector.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRetentionModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl RetentionModel for LogisticRetentionModel {
    fn predict(&self, features: &[f64; FEATURE_DIM]) -> RetentionPrediction {
        let z = dot(&self.weights, features) + self.intercept;
        let leave_probability = sigmoid(z);
        RetentionPrediction {
            will_leave: leave_probability >= 0.5,
            leave_probability,
            stay_probability: 1.0 - leave_probability,
        }
    }
}

/// Plain linear regression over the profile feature vector. Plugs into the
/// match engine through the `SalaryEstimator` seam.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearSalaryModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl SalaryEstimator for LinearSalaryModel {
    fn estimate(&self, features: &[f64; FEATURE_DIM]) -> f64 {
        dot(&self.weights, features) + self.intercept
    }
}

/// Multinomial linear classifier: one weight row per role, softmax over
/// the class scores for the confidence.
#[derive(Debug, Clone, Deserialize)]
pub struct SoftmaxRoleModel {
    pub roles: Vec<String>,
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SoftmaxRoleModel {
    fn validate_classes(&self) -> Result<(), AppError> {
        if self.roles.is_empty() {
            return Err(AppError::Configuration(
                "role model has no classes".to_string(),
            ));
        }
        if self.weights.len() != self.roles.len() || self.intercepts.len() != self.roles.len() {
            return Err(AppError::Configuration(
                "role model classes, weights, and intercepts disagree".to_string(),
            ));
        }
        for row in &self.weights {
            check_dim("role", row.len())?;
        }
        Ok(())
    }
}

impl RoleModel for SoftmaxRoleModel {
    fn predict(&self, features: &[f64; FEATURE_DIM]) -> RolePrediction {
        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| dot(row, features) + intercept)
            .collect();

        // Max-subtracted softmax keeps the exponentials finite.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }

        RolePrediction {
            role: self.roles[best].clone(),
            confidence: exps[best] / total,
        }
    }
}

/// The predictor set held in app state. Each slot is independently
/// optional so a partial model install still serves what it can.
#[derive(Clone, Default)]
pub struct Predictors {
    pub retention: Option<Arc<dyn RetentionModel>>,
    pub salary: Option<Arc<dyn SalaryEstimator>>,
    pub role: Option<Arc<dyn RoleModel>>,
}

impl Predictors {
    /// Loads coefficient files from `dir`. A missing file disables that
    /// predictor; a malformed one is a deployment error and fails startup.
    pub fn load(dir: &str) -> Result<Self, AppError> {
        let retention = load_model::<LogisticRetentionModel>(dir, "retention.json")?
            .map(|m| -> Arc<dyn RetentionModel> { Arc::new(m) });
        let salary = load_model::<LinearSalaryModel>(dir, "salary.json")?
            .map(|m| -> Arc<dyn SalaryEstimator> { Arc::new(m) });
        let role = load_model::<SoftmaxRoleModel>(dir, "role.json")?
            .map(|m| -> Arc<dyn RoleModel> { Arc::new(m) });

        Ok(Predictors {
            retention,
            salary,
            role,
        })
    }

    pub fn loaded_count(&self) -> usize {
        self.retention.is_some() as usize
            + self.salary.is_some() as usize
            + self.role.is_some() as usize
    }
}

trait ValidatedModel: for<'de> Deserialize<'de> {
    fn validate(&self) -> Result<(), AppError>;
}

impl ValidatedModel for LogisticRetentionModel {
    fn validate(&self) -> Result<(), AppError> {
        check_dim("retention", self.weights.len())
    }
}

impl ValidatedModel for LinearSalaryModel {
    fn validate(&self) -> Result<(), AppError> {
        check_dim("salary", self.weights.len())
    }
}

impl ValidatedModel for SoftmaxRoleModel {
    fn validate(&self) -> Result<(), AppError> {
        self.validate_classes()
    }
}

fn load_model<M: ValidatedModel>(dir: &str, file: &str) -> Result<Option<M>, AppError> {
    let path = std::path::Path::new(dir).join(file);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => {
            tracing::warn!("model file {} not found, predictor disabled", path.display());
            return Ok(None);
        }
    };
    let model: M = serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("invalid model file {file}: {e}")))?;
    model.validate()?;
    Ok(Some(model))
}

fn check_dim(model: &str, len: usize) -> Result<(), AppError> {
    if len != FEATURE_DIM {
        return Err(AppError::Configuration(format!(
            "{model} model expects {FEATURE_DIM} coefficients, found {len}"
        )));
    }
    Ok(())
}

fn dot(weights: &[f64], features: &[f64; FEATURE_DIM]) -> f64 {
    weights
        .iter()
        .zip(features.iter())
        .map(|(w, x)| w * x)
        .sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
