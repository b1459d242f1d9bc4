//! # pay-stripe
//!
//! Stripe payment strategy for the fund-transfer checkout.
//!
//! **StripeIntentStrategy** creates Payment Intents over the Stripe REST API.
//! The browser confirms them with Stripe.js using the returned client secret,
//! so card data never passes through this server.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeIntentStrategy;
//! use pay_core::{IntentPolicy, MinorUnits, PaymentStrategy};
//!
//! // Create strategy from environment
//! let strategy = StripeIntentStrategy::from_env()?;
//!
//! // Create a payment intent for $10.00
//! let request = IntentPolicy::default().intent_request(MinorUnits(1000));
//! let intent = strategy.create_payment_intent(&request).await?;
//!
//! // Send intent.client_secret to the browser
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeIntentStrategy;
