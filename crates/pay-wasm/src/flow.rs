//! # Checkout Flow Steps
//!
//! The decisions the form makes at each step, separated from the DOM and
//! network so they can be tested natively. Each step takes what came back
//! from the previous await and either yields the value for the next one or
//! a [`CheckoutError`] that ends the flow.

use crate::error::{CheckoutError, UNKNOWN_ERROR};
use pay_core::{Currency, IntentStatus, MinorUnits};
use serde::{Deserialize, Serialize};

/// Body of `GET /config`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(default)]
    pub publishable_key: Option<String>,
}

/// Body of `POST /create-payment-intent`
#[derive(Debug, Serialize)]
pub struct IntentRequest<'a> {
    /// Sent exactly as typed; the server does the parsing
    pub amount: &'a str,
}

/// Response of `POST /create-payment-intent`, success or failure
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error object produced by Stripe.js
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessorError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Event passed to the card element's `change` listener
#[derive(Debug, Default, Deserialize)]
pub struct CardChangeEvent {
    #[serde(default)]
    pub error: Option<ProcessorError>,
}

/// The part of a confirmed PaymentIntent the form looks at
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmedIntent {
    #[serde(default)]
    pub id: Option<String>,
    pub status: IntentStatus,
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Result of `stripe.confirmCardPayment`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResult {
    #[serde(default)]
    pub payment_intent: Option<ConfirmedIntent>,
    #[serde(default)]
    pub error: Option<ProcessorError>,
}

/// Step 1: the publishable key must be present
pub fn read_config(config: ConfigResponse) -> Result<String, CheckoutError> {
    config
        .publishable_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            CheckoutError::Config("Publishable key not found in /config response".to_string())
        })
}

/// Step 2: the backend must answer 2xx without an `error` field.
///
/// `body` is `None` when the response could not be read as JSON.
pub fn read_intent_response(
    ok: bool,
    body: Option<IntentResponse>,
) -> Result<String, CheckoutError> {
    let body = body.unwrap_or_default();

    if let Some(error) = body.error {
        return Err(CheckoutError::Backend(error));
    }
    if !ok {
        return Err(CheckoutError::Backend(UNKNOWN_ERROR.to_string()));
    }

    body.client_secret
        .filter(|secret| !secret.is_empty())
        .ok_or_else(|| CheckoutError::Backend(UNKNOWN_ERROR.to_string()))
}

/// Step 3: Stripe.js must report no error and a succeeded intent
pub fn read_confirmation(result: ConfirmationResult) -> Result<ConfirmedIntent, CheckoutError> {
    if let Some(error) = result.error {
        return Err(CheckoutError::Confirmation(
            error.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ));
    }

    let intent = result
        .payment_intent
        .ok_or_else(|| CheckoutError::Confirmation(UNKNOWN_ERROR.to_string()))?;

    if !intent.status.is_succeeded() {
        return Err(CheckoutError::UnexpectedStatus(intent.status.to_string()));
    }
    Ok(intent)
}

/// Text mirrored into the error display while the user types
pub fn card_error_text(event: CardChangeEvent) -> String {
    event
        .error
        .and_then(|error| error.message)
        .unwrap_or_default()
}

/// Message shown once the payment has succeeded
pub fn success_message(intent: &ConfirmedIntent) -> String {
    let currency = intent
        .currency
        .as_deref()
        .and_then(|code| code.parse::<Currency>().ok())
        .unwrap_or_default();

    format!(
        "Payment Succeeded! {} is now processing to your bank account.",
        MinorUnits(intent.amount).display(currency)
    )
}
