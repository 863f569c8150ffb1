use axum::extract::FromRef;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::recommendation::RecommendationEngine;
use crate::validation::SchemaRegistry;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub schemas: Arc<SchemaRegistry>,
    pub engine: Arc<RecommendationEngine>,
    pub registry: Registry,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(schemas: SchemaRegistry, engine: RecommendationEngine, registry: Registry) -> Self {
        Self {
            schemas: Arc::new(schemas),
            engine: Arc::new(engine),
            registry,
            started_at: Instant::now(),
        }
    }
}

// Lets the validating extractors reach the schema registry
impl FromRef<AppState> for Arc<SchemaRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.schemas.clone()
    }
}
