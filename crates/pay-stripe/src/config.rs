//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...), handed to the browser as-is.
    /// Not validated here; the page refuses to load the card form without it.
    pub publishable_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_PUBLIC_KEY` (or `STRIPE_PUBLISHABLE_KEY`)
    /// - `STRIPE_API_BASE`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        // Standard and restricted keys are both accepted
        let valid_prefix = ["sk_test_", "sk_live_", "rk_test_", "rk_live_"]
            .iter()
            .any(|prefix| secret_key.starts_with(prefix));
        if !valid_prefix {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_, sk_live_, rk_test_ or rk_live_"
                    .to_string(),
            ));
        }

        let publishable_key = lookup("STRIPE_PUBLIC_KEY")
            .or_else(|| lookup("STRIPE_PUBLISHABLE_KEY"))
            .filter(|key| !key.is_empty());

        let api_base_url =
            lookup("STRIPE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            secret_key,
            publishable_key,
            api_base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: Option<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_") || self.secret_key.starts_with("rk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_mode_detection() {
        let config = StripeConfig::new("sk_test_abc123", Some("pk_test_xyz789".into()));
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = StripeConfig::new("sk_live_abc123", None);
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", None);
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_lookup_missing_secret_key() {
        let result = StripeConfig::from_lookup(lookup_from(&[("STRIPE_PUBLIC_KEY", "pk_test_1")]));
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn test_lookup_rejects_publishable_key_as_secret() {
        let result = StripeConfig::from_lookup(lookup_from(&[("STRIPE_SECRET_KEY", "pk_test_1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_public_key_is_optional() {
        let config =
            StripeConfig::from_lookup(lookup_from(&[("STRIPE_SECRET_KEY", "sk_test_1")])).unwrap();
        assert_eq!(config.publishable_key, None);
        assert_eq!(config.api_base_url, "https://api.stripe.com");
    }

    #[test]
    fn test_lookup_public_key_fallback_and_base_override() {
        let config = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "rk_test_1"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_2"),
            ("STRIPE_API_BASE", "http://localhost:12111"),
        ]))
        .unwrap();
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_2"));
        assert_eq!(config.api_base_url, "http://localhost:12111");

        let config = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "sk_test_1"),
            ("STRIPE_PUBLIC_KEY", "pk_test_primary"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_fallback"),
        ]))
        .unwrap();
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_primary"));
    }
}
