use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters for a hosted checkout session covering a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckout {
    pub product_name: String,
    /// Lowercase ISO 4217 code.
    pub currency: String,
    /// Price per unit in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
    pub success_url: String,
    pub cancel_url: String,
}

/// The provider-hosted transaction record. Only the identifier and the
/// hosted-page URL are of interest to us; everything else stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's ID (e.g. cs_123)
    pub id: String,
    /// Where to send the customer to complete payment.
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Open,
    Completed,
    Expired,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
            Self::Expired => "EXPIRED",
        }
    }
}

/// Local record of a checkout session, created when `/buy` hands the
/// customer off to the provider and resolved by the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Provider session id, our primary key for webhook correlation.
    pub session_id: String,
    pub item_id: Uuid,
    pub quantity: u32,
    pub amount: i64,
    pub currency: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Provider rejected the request: {0}")]
    Provider(String),
    #[error("Could not reach payment provider: {0}")]
    Transport(String),
    #[error("Unexpected provider response: {0}")]
    Protocol(String),
}

/// Abstraction over the payment provider's hosted-checkout API.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session with the provider.
    async fn create_checkout(&self, req: &CreateCheckout) -> Result<CheckoutSession, PaymentError>;
}
