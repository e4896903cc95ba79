use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod health;
pub mod market;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/market", get(market::market))
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
