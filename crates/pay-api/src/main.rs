//! # Fund Transfer
//!
//! Card checkout backed by Stripe Payment Intents.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLIC_KEY=pk_test_...
//!
//! # Build the browser controller into public/pkg
//! wasm-pack build crates/pay-wasm --target web --out-dir ../../public/pkg
//!
//! # Run the server
//! fund-transfer
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let currency = state.policy.currency;

    info!("Environment: {}", state.config.environment);
    info!("Static files: {}", state.config.static_dir.display());
    info!(
        "Minimum amount: {} ({})",
        state.policy.minimum_amount.display(currency),
        currency
    );

    let is_prod = state.config.is_production();
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    info!(
        "Stripe Payouts will be sent to your linked {} bank account.",
        currency
    );

    if !is_prod {
        info!("Checkout page: http://{}/", addr);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Fund Transfer
  ━━━━━━━━━━━━━━━━━━━━━━━
  Stripe card checkout
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
