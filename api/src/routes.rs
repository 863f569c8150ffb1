use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, metrics_handler, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(metrics_handler::metrics_endpoint))
}

pub fn schema_routes() -> Router<AppState> {
    Router::new()
        .route("/api/schemas", get(handlers::list_schemas))
        .route("/api/validate/:schema", post(handlers::validate_payload))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
}

pub fn marketplace_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/api/products/:id", get(handlers::get_product))
        .route("/api/orders", post(handlers::create_order))
        .route("/api/orders/:id/status", patch(handlers::update_order_status))
        .route("/api/schemes", post(handlers::create_scheme))
        .route("/api/notifications", post(handlers::create_notification))
}

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/soil/reports", post(handlers::submit_soil_report))
        .route("/api/crops/suggestions", get(handlers::crop_suggestions))
        .route("/api/disease/detect", post(handlers::detect_disease))
}
