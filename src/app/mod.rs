pub mod config;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;
use crate::handlers::{self, index, payments};
use crate::services::PaymentService;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
    pub index_file: Arc<PathBuf>,
}

impl AppState {
    pub fn new(payments: PaymentService, index_file: impl Into<PathBuf>) -> Self {
        Self {
            payments: Arc::new(payments),
            index_file: Arc::new(index_file.into()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Ok(Self::new(
            PaymentService::from_config(config)?,
            config.index_file.clone(),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::landing_page))
        .route("/health", get(handlers::health_handler))
        .route("/paiement", post(payments::create_payment))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
