//! # Payment Error Types
//!
//! Typed error handling for the checkout.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Amount is not a number or does not exceed the minimum
    #[error("Invalid or insufficient amount")]
    InvalidAmount,

    /// Payment provider rejected the request; `message` is the provider's own text
    #[error("{message}")]
    Upstream { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Shorthand for an upstream failure from `provider`
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns true if the client sent something we refused
    pub fn is_client_error(&self) -> bool {
        matches!(self, PaymentError::InvalidAmount)
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidAmount => 400,
            PaymentError::Configuration(_)
            | PaymentError::Upstream { .. }
            | PaymentError::Network(_)
            | PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::InvalidAmount.status_code(), 400);
        assert_eq!(
            PaymentError::upstream("stripe", "Your card was declined.").status_code(),
            500
        );
        assert_eq!(PaymentError::Network("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_messages_are_client_facing() {
        assert_eq!(
            PaymentError::InvalidAmount.to_string(),
            "Invalid or insufficient amount"
        );
        assert_eq!(
            PaymentError::upstream("stripe", "Amount must be no more than $999,999.99")
                .to_string(),
            "Amount must be no more than $999,999.99"
        );
        assert!(PaymentError::InvalidAmount.is_client_error());
        assert!(!PaymentError::Network("reset".into()).is_client_error());
    }
}
