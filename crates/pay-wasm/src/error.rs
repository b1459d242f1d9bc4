//! Errors surfaced by the checkout form.
//!
//! `Display` is the text shown to the user; [`CheckoutError::detail`] is what
//! goes to the console.

use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// `/config` failed or Stripe.js could not be initialized
    #[error("Failed to load payment form. Please try again later.")]
    Config(String),

    /// A fetch to the backend rejected
    #[error("{0}")]
    Network(String),

    /// The backend answered with an error
    #[error("{0}")]
    Backend(String),

    /// Stripe.js refused the card or the confirmation call failed
    #[error("{0}")]
    Confirmation(String),

    /// Confirmation went through but the intent did not succeed
    #[error("Payment status: {0}. Please try again.")]
    UnexpectedStatus(String),
}

impl CheckoutError {
    pub fn detail(&self) -> &str {
        match self {
            CheckoutError::Config(detail)
            | CheckoutError::Network(detail)
            | CheckoutError::Backend(detail)
            | CheckoutError::Confirmation(detail)
            | CheckoutError::UnexpectedStatus(detail) => detail,
        }
    }
}
