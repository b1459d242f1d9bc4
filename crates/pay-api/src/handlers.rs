//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//! Every failure body has the shape `{ "error": "..." }`.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{AmountInput, PaymentError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in major units, as a number or as the raw form text
    #[serde(default)]
    pub amount: Option<AmountInput>,
}

/// Create payment intent response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Token the browser passes to Stripe.js to confirm the payment
    pub client_secret: String,
    /// Normalized amount in major units (e.g., 10.5)
    pub amount: f64,
}

/// Public configuration for the browser
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    if err.is_client_error() {
        warn!("Rejected request: {}", err);
    } else {
        error!("Payment intent creation failed: {:?}", err);
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fund-transfer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Publishable key for initializing Stripe.js
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.publishable_key.clone(),
    })
}

/// Create a payment intent for the submitted amount
#[instrument(skip(state, payload))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    // An unreadable body carries no amount
    let input = match payload {
        Ok(Json(request)) => request.amount,
        Err(rejection) => {
            warn!("Unreadable payment intent request: {}", rejection.body_text());
            None
        }
    };

    let amount = input
        .as_ref()
        .ok_or(PaymentError::InvalidAmount)
        .and_then(|input| state.policy.validate(input))
        .map_err(payment_error_to_response)?;

    let request = state.policy.intent_request(amount);

    let intent = state
        .strategy
        .create_payment_intent(&request)
        .await
        .map_err(payment_error_to_response)?;

    info!(
        "Payment intent {} created for {}",
        intent.id,
        amount.display(request.currency)
    );

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
        amount: amount.to_major(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error");
        assert_eq!(err.error, "Test error");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "error": "Test error" })
        );
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, Json(body)) = payment_error_to_response(PaymentError::InvalidAmount);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid or insufficient amount");

        let (status, Json(body)) =
            payment_error_to_response(PaymentError::upstream("stripe", "Your card was declined."));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Your card was declined.");
    }

    #[test]
    fn test_only_client_errors_map_to_4xx() {
        let errors = vec![
            PaymentError::InvalidAmount,
            PaymentError::Configuration("missing key".into()),
            PaymentError::upstream("stripe", "declined"),
            PaymentError::Network("reset".into()),
            PaymentError::Serialization("bad json".into()),
        ];

        for err in errors {
            let client = err.is_client_error();
            let (status, _) = payment_error_to_response(err);
            assert_eq!(status.is_client_error(), client, "status {}", status);
            assert_eq!(status.is_server_error(), !client, "status {}", status);
        }
    }

    #[test]
    fn test_response_field_names() {
        let response = CreatePaymentIntentResponse {
            client_secret: "pi_1_secret_2".to_string(),
            amount: 10.5,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "clientSecret": "pi_1_secret_2", "amount": 10.5 })
        );

        let config = ConfigResponse { publishable_key: None };
        assert_eq!(serde_json::to_value(&config).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_request_accepts_number_or_string() {
        let request: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{ "amount": "10.00" }"#).unwrap();
        assert_eq!(request.amount, Some(AmountInput::Text("10.00".to_string())));

        let request: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{ "amount": 10 }"#).unwrap();
        assert_eq!(request.amount, Some(AmountInput::Number(10.0)));

        let request: CreatePaymentIntentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.amount, None);
    }
}
