use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::predictors::Predictors;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Read-only reference data, loaded once at startup and never mutated.
    pub catalog: Arc<Catalog>,
    /// Offline-trained predictors; each slot is independently optional.
    pub predictors: Predictors,
    pub config: Config,
}
