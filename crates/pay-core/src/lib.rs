//! # pay-core
//!
//! Core types and traits for the fund-transfer checkout.
//!
//! This crate provides:
//! - `AmountInput`, `MinorUnits` and `Currency` for amount handling
//! - `IntentPolicy` for amount validation and intent parameters
//! - `CreatePaymentIntent`, `PaymentIntent` and `IntentStatus`
//! - `PaymentStrategy` trait for implementing payment providers
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{AmountInput, IntentPolicy, PaymentStrategy};
//!
//! let policy = IntentPolicy::default();
//!
//! // "10.00" -> 1000 minor units; anything at or below 50 is refused
//! let amount = policy.validate(&AmountInput::from("10.00"))?;
//!
//! let intent = strategy.create_payment_intent(&policy.intent_request(amount)).await?;
//!
//! // Hand intent.client_secret to the browser
//! ```

pub mod amount;
pub mod error;
pub mod intent;
pub mod strategy;

// Re-exports for convenience
pub use amount::{parse_major_units, AmountInput, Currency, MinorUnits};
pub use error::{PaymentError, PaymentResult};
pub use intent::{CreatePaymentIntent, IntentPolicy, IntentStatus, PaymentIntent};
pub use strategy::{BoxedPaymentStrategy, PaymentStrategy};
