use anyhow::{Context, Result};
use dotenv::dotenv;
use std::net::SocketAddr;

use api::config::{AppConfig, LogFormat};
use api::metrics;
use api::observability::Observability;
use api::recommendation::RecommendationEngine;
use api::state::AppState;
use api::validation::SchemaRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init(LogFormat::from_env())?;
    let config = AppConfig::from_env();

    let schemas = SchemaRegistry::new();
    schemas.verify().context("schema registry is incomplete")?;
    metrics::SCHEMAS_REGISTERED.set(schemas.iter().count() as i64);
    tracing::info!(schemas = schemas.iter().count(), "Validation schemas loaded");

    let engine = RecommendationEngine::with_random_predictor(config.predictor_seed);
    tracing::info!(predictor = engine.predictor_name(), "Recommendation engine ready");

    let state = AppState::new(schemas, engine, obs.registry);
    let app = api::app(state, api::cors_layer(&config.cors_origins));

    tracing::info!("API server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
