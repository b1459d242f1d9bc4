//! # Stripe Payment Intents
//!
//! Implementation of the Stripe Payment Intents API.
//! The card itself is collected and confirmed in the browser by Stripe.js;
//! this side only creates the intent and hands back its client secret.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pay_core::{
    CreatePaymentIntent, IntentStatus, MinorUnits, PaymentError, PaymentIntent, PaymentResult,
    PaymentStrategy,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Payment Intent strategy
pub struct StripeIntentStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeIntentStrategy {
    /// Create a new Stripe payment-intent strategy
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Form body for `POST /v1/payment_intents`
    fn form_params(request: &CreatePaymentIntent) -> Vec<(String, String)> {
        let mut form_params = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency.as_str().to_string()),
            ("description".to_string(), request.description.clone()),
        ];

        for (i, method) in request.payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        form_params
    }
}

#[async_trait]
impl PaymentStrategy for StripeIntentStrategy {
    #[instrument(skip(self, request), fields(amount = %request.amount, currency = %request.currency))]
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> PaymentResult<PaymentIntent> {
        let form_params = Self::form_params(request);
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        debug!("Creating Stripe payment intent");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::upstream(PROVIDER, error_response.error.message));
            }

            return Err(PaymentError::upstream(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let intent: StripePaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::Serialization("Stripe response has no client_secret".to_string())
        })?;

        info!("Created Stripe payment intent: id={}, status={}", intent.id, intent.status);

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: MinorUnits(intent.amount),
            currency: intent.currency.parse().unwrap_or(request.currency),
            status: IntentStatus::from(intent.status.as_str()),
            created: DateTime::from_timestamp(intent.created, 0).unwrap_or_else(Utc::now),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    status: String,
    #[serde(default)]
    created: i64,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default, rename = "type")]
    #[allow(dead_code)]
    error_type: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::{Currency, IntentPolicy};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn strategy_for(server: &MockServer) -> StripeIntentStrategy {
        let config = StripeConfig::new("sk_test_123", Some("pk_test_123".to_string()))
            .with_api_base_url(server.uri());
        StripeIntentStrategy::new(config).unwrap()
    }

    fn request(amount: i64) -> CreatePaymentIntent {
        IntentPolicy::default().intent_request(MinorUnits(amount))
    }

    #[test]
    fn test_form_params() {
        let params = StripeIntentStrategy::form_params(&request(1000));
        assert!(params.contains(&("amount".to_string(), "1000".to_string())));
        assert!(params.contains(&("currency".to_string(), "usd".to_string())));
        assert!(params.contains(&("payment_method_types[0]".to_string(), "card".to_string())));
        assert!(params.contains(&(
            "description".to_string(),
            "Personal fund transfer via web app".to_string()
        )));
    }

    #[tokio::test]
    async fn test_create_payment_intent_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(body_string_contains("amount=1000"))
            .and(body_string_contains("currency=usd"))
            .and(body_string_contains("payment_method_types%5B0%5D=card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_123",
                "object": "payment_intent",
                "client_secret": "pi_123_secret_abc",
                "amount": 1000,
                "currency": "usd",
                "status": "requires_payment_method",
                "created": 1_700_000_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let intent = strategy_for(&server)
            .create_payment_intent(&request(1000))
            .await
            .unwrap();

        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_abc");
        assert_eq!(intent.amount, MinorUnits(1000));
        assert_eq!(intent.currency, Currency::USD);
        assert_eq!(intent.status, IntentStatus::RequiresPaymentMethod);
        assert_eq!(intent.created.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_stripe_error_message_is_relayed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "code": "amount_too_large",
                    "message": "Amount must be no more than $999,999.99"
                }
            })))
            .mount(&server)
            .await;

        let err = strategy_for(&server)
            .create_payment_intent(&request(100_000_000))
            .await
            .unwrap_err();

        match err {
            PaymentError::Upstream { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Amount must be no more than $999,999.99");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = strategy_for(&server)
            .create_payment_intent(&request(1000))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Upstream { .. }));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_missing_client_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_123",
                "amount": 1000,
                "currency": "usd",
                "status": "requires_payment_method"
            })))
            .mount(&server)
            .await;

        let err = strategy_for(&server)
            .create_payment_intent(&request(1000))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_network_error() {
        // Nothing listens on port 9 on the loopback interface
        let config = StripeConfig::new("sk_test_123", None).with_api_base_url("http://127.0.0.1:9");
        let strategy = StripeIntentStrategy::new(config).unwrap();

        let err = strategy.create_payment_intent(&request(1000)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Network(_)));
        assert_eq!(err.status_code(), 500);
    }
}
