//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - GET  /config - Publishable key for Stripe.js
/// - POST /create-payment-intent - Create a payment intent
/// - GET  /health - Health check
///
/// Anything else is served from the static directory (the checkout page).
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/config", get(handlers::config))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .route("/health", get(handlers::health))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
