pub mod config;
pub mod controllers;
pub mod engine;
pub mod gateway;
pub mod models;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state for the whole application
pub struct AppState {
    pub engine: engine::BookingEngine,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let engine =
            engine::BookingEngine::new(config.sections.clone(), config.pricing.clone());
        Arc::new(Self { engine, config })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Seatbook API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
