//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and read-only afterwards; handlers receive it via `State`.

use anyhow::Context;
use pay_core::{BoxedPaymentStrategy, IntentPolicy};
use pay_stripe::StripeIntentStrategy;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the checkout page and wasm bundle
    pub static_dir: PathBuf,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit path to the checkout policy file
    pub checkout_config: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            checkout_config: std::env::var("CHECKOUT_CONFIG").ok().map(PathBuf::from),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("Invalid socket address: {}", addr))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4242,
            static_dir: PathBuf::from("public"),
            environment: "development".to_string(),
            checkout_config: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub strategy: BoxedPaymentStrategy,
    /// Public key served to the browser at `/config`
    pub publishable_key: Option<String>,
    /// Amount rules and intent parameters
    pub policy: Arc<IntentPolicy>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe strategy
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let policy = load_policy(&config)?;

        let stripe = StripeIntentStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let stripe_config = stripe.config();
        info!(
            "Stripe mode: {}",
            if stripe_config.is_live_mode() { "live" } else { "test" }
        );
        let publishable_key = stripe_config.publishable_key.clone();
        if publishable_key.is_none() {
            warn!("STRIPE_PUBLIC_KEY is not set; the checkout page will not load the card form");
        }

        Ok(Self::with_strategy(
            Arc::new(stripe),
            publishable_key,
            policy,
            config,
        ))
    }

    /// Assemble state from already-built parts
    pub fn with_strategy(
        strategy: BoxedPaymentStrategy,
        publishable_key: Option<String>,
        policy: IntentPolicy,
        config: AppConfig,
    ) -> Self {
        Self {
            strategy,
            publishable_key,
            policy: Arc::new(policy),
            config,
        }
    }
}

/// Load the checkout policy from `CHECKOUT_CONFIG` or `config/checkout.toml`,
/// falling back to the built-in defaults.
pub fn load_policy(config: &AppConfig) -> anyhow::Result<IntentPolicy> {
    if let Some(path) = &config.checkout_config {
        return read_policy(path);
    }

    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    for path in config_paths.iter().map(Path::new) {
        if path.exists() {
            return read_policy(path);
        }
    }

    info!("No checkout config found, using defaults");
    Ok(IntentPolicy::default())
}

fn read_policy(path: &Path) -> anyhow::Result<IntentPolicy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let policy = IntentPolicy::from_toml(&content)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    info!("Loaded checkout config from {}", path.display());
    Ok(policy)
}
