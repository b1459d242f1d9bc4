//! # pay-api
//!
//! HTTP API layer for the fund-transfer checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The two endpoints the checkout page talks to
//! - Static serving of the checkout page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/config` | Publishable key |
//! | POST | `/create-payment-intent` | Create payment intent |
//! | GET | `/health` | Health check |
//! | GET | `/*` | Static files |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
