pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod payments;
pub mod ports;
pub mod services;
pub mod use_cases;
pub mod webhooks;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::payments::BoldClient;
use crate::use_cases::ReconcileWebhook;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reconciler: Arc<ReconcileWebhook>,
    pub bold: BoldClient,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/products", get(handlers::products::list_products))
        .route("/payment-links", post(handlers::payment_links::create_payment_link))
        .route("/webhooks/bold", post(handlers::webhooks::bold_webhook))
        .route("/webhooks/epayco", post(handlers::webhooks::epayco_webhook))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
