//! # Payment Strategy Trait
//!
//! Seam between the HTTP layer and a payment provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         PaymentStrategy (trait)             │
//! │  ├── create_payment_intent()                │
//! │  └── provider_name()                        │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!              ┌────────┴────────┐
//!              │StripeIntent     │
//!              │   Strategy      │
//!              └─────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::intent::{CreatePaymentIntent, PaymentIntent};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a payment intent for an already validated amount.
    ///
    /// # Returns
    /// The provider's intent, including the client secret the browser needs
    /// to confirm the payment.
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> PaymentResult<PaymentIntent>;

    /// Get the provider name (for logging and error attribution).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{Currency, MinorUnits};
    use crate::intent::{IntentPolicy, IntentStatus};
    use chrono::Utc;

    struct EchoStrategy;

    #[async_trait]
    impl PaymentStrategy for EchoStrategy {
        async fn create_payment_intent(
            &self,
            request: &CreatePaymentIntent,
        ) -> PaymentResult<PaymentIntent> {
            Ok(PaymentIntent {
                id: "pi_echo".to_string(),
                client_secret: format!("pi_echo_secret_{}", request.amount),
                amount: request.amount,
                currency: request.currency,
                status: IntentStatus::RequiresPaymentMethod,
                created: Utc::now(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_boxed_strategy_dispatch() {
        let strategy: BoxedPaymentStrategy = Arc::new(EchoStrategy);
        let request = IntentPolicy::default().intent_request(MinorUnits(700));

        let intent = strategy.create_payment_intent(&request).await.unwrap();

        assert_eq!(strategy.provider_name(), "echo");
        assert_eq!(intent.client_secret, "pi_echo_secret_700");
        assert_eq!(intent.currency, Currency::USD);
    }
}
