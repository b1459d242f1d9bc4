//! # Payment Intent Types
//!
//! Request and response types for payment-intent creation, plus the
//! [`IntentPolicy`] that turns a submitted amount into a request.

use crate::amount::{AmountInput, Currency, MinorUnits};
use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters for creating a payment intent with a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentIntent {
    /// Amount in minor units
    pub amount: MinorUnits,
    pub currency: Currency,
    /// Shown on the provider dashboard and receipts
    pub description: String,
    pub payment_method_types: Vec<String>,
}

/// A payment intent as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider intent ID (e.g., pi_...)
    pub id: String,
    /// Opaque token the browser uses to confirm the payment
    pub client_secret: String,
    pub amount: MinorUnits,
    pub currency: Currency,
    pub status: IntentStatus,
    pub created: DateTime<Utc>,
}

/// Lifecycle status of a payment intent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Status this crate does not know about, kept verbatim
    Other(String),
}

impl IntentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::RequiresAction => "requires_action",
            IntentStatus::Processing => "processing",
            IntentStatus::RequiresCapture => "requires_capture",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Other(s) => s,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, IntentStatus::Succeeded)
    }
}

impl From<&str> for IntentStatus {
    fn from(s: &str) -> Self {
        match s {
            "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
            "requires_confirmation" => IntentStatus::RequiresConfirmation,
            "requires_action" => IntentStatus::RequiresAction,
            "processing" => IntentStatus::Processing,
            "requires_capture" => IntentStatus::RequiresCapture,
            "canceled" => IntentStatus::Canceled,
            "succeeded" => IntentStatus::Succeeded,
            other => IntentStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IntentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IntentStatus::from(s.as_str()))
    }
}

/// Rules applied to every submitted amount.
///
/// Loaded once at startup (see `config/checkout.toml`) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentPolicy {
    pub currency: Currency,
    /// Amounts at or below this many minor units are refused
    pub minimum_amount: MinorUnits,
    pub description: String,
    pub payment_method_types: Vec<String>,
}

impl Default for IntentPolicy {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            minimum_amount: MinorUnits(50),
            description: "Personal fund transfer via web app".to_string(),
            payment_method_types: vec!["card".to_string()],
        }
    }
}

impl IntentPolicy {
    /// Parse a policy from TOML; absent keys keep their defaults
    pub fn from_toml(content: &str) -> PaymentResult<Self> {
        let policy: IntentPolicy = toml::from_str(content).map_err(|e| {
            PaymentError::Configuration(format!("Invalid checkout config: {}", e))
        })?;

        if policy.payment_method_types.is_empty() {
            return Err(PaymentError::Configuration(
                "payment_method_types must not be empty".to_string(),
            ));
        }
        Ok(policy)
    }

    /// Convert a submitted amount to minor units and check it against the minimum
    pub fn validate(&self, input: &AmountInput) -> PaymentResult<MinorUnits> {
        let amount = input
            .major_units()
            .and_then(|major| self.currency.to_minor_units(major))
            .ok_or(PaymentError::InvalidAmount)?;

        if amount <= self.minimum_amount {
            return Err(PaymentError::InvalidAmount);
        }
        Ok(amount)
    }

    /// Build the provider request for an already validated amount
    pub fn intent_request(&self, amount: MinorUnits) -> CreatePaymentIntent {
        CreatePaymentIntent {
            amount,
            currency: self.currency,
            description: self.description.clone(),
            payment_method_types: self.payment_method_types.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_amounts_above_minimum() {
        let policy = IntentPolicy::default();
        assert_eq!(policy.validate(&"10.00".into()).unwrap(), MinorUnits(1000));
        assert_eq!(policy.validate(&AmountInput::Number(0.51)).unwrap(), MinorUnits(51));
        assert_eq!(policy.validate(&" 25.5 dollars".into()).unwrap(), MinorUnits(2550));
    }

    #[test]
    fn test_validate_rejects_minimum_and_below() {
        let policy = IntentPolicy::default();
        for input in ["0.50", "0.504", "0.10", "0", "-20", "abc", "", "Infinity"] {
            assert!(
                matches!(policy.validate(&input.into()), Err(PaymentError::InvalidAmount)),
                "expected {:?} to be rejected",
                input
            );
        }
        assert!(policy.validate(&AmountInput::Number(0.5)).is_err());
    }

    #[test]
    fn test_intent_request_uses_policy() {
        let policy = IntentPolicy::default();
        let request = policy.intent_request(MinorUnits(1234));
        assert_eq!(request.amount, MinorUnits(1234));
        assert_eq!(request.currency, Currency::USD);
        assert_eq!(request.description, "Personal fund transfer via web app");
        assert_eq!(request.payment_method_types, vec!["card".to_string()]);
    }

    #[test]
    fn test_policy_from_toml() {
        let policy = IntentPolicy::from_toml(
            r#"
            currency = "eur"
            minimum_amount = 100
            "#,
        )
        .unwrap();
        assert_eq!(policy.currency, Currency::EUR);
        assert_eq!(policy.minimum_amount, MinorUnits(100));
        assert_eq!(policy.description, IntentPolicy::default().description);

        assert_eq!(IntentPolicy::from_toml("").unwrap(), IntentPolicy::default());
        assert!(IntentPolicy::from_toml("currency = \"btc\"").is_err());
        assert!(IntentPolicy::from_toml("payment_method_types = []").is_err());
    }

    #[test]
    fn test_status_round_trip() {
        let status: IntentStatus = serde_json::from_str("\"succeeded\"").unwrap();
        assert!(status.is_succeeded());

        let status: IntentStatus = serde_json::from_str("\"requires_action\"").unwrap();
        assert_eq!(status, IntentStatus::RequiresAction);

        let status = IntentStatus::from("blocked");
        assert_eq!(status, IntentStatus::Other("blocked".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"blocked\"");
    }
}
