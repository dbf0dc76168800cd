pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::services::ai_service::AIService;
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ai_service: AIService,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let http_client = Client::builder().build()?;
        let ai_service = AIService::new(&config, http_client);

        Ok(Self {
            config: Arc::new(config),
            ai_service,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/generate-quiz", post(routes::quiz::generate_quiz))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
