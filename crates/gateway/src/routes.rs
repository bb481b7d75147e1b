//! Route-Definitionen

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::GatewayState;

/// Erstellt den vollstaendigen Router
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/data/", post(handlers::post_data))
        .route("/data", post(handlers::post_data))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
