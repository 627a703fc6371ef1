mod assessment;
mod catalog;
mod config;
mod db;
mod employees;
mod errors;
mod predictors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::builtin::builtin_catalog;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::predictors::Predictors;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Workforce API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;

    // Load the role/skill catalog once; it is read-only for the process lifetime
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => builtin_catalog()?,
    };
    info!(
        "Catalog loaded: {} roles, {} skills",
        catalog.roles().len(),
        catalog.skills().count()
    );
    let catalog = Arc::new(catalog);

    // Load offline-trained predictors; missing files disable their endpoints
    let predictors = Predictors::load(&config.model_dir)?;
    info!("Predictors loaded: {}/3 models", predictors.loaded_count());

    // Build app state
    let state = AppState {
        db,
        catalog,
        predictors,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
