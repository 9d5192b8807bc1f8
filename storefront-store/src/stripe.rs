//! Outbound client for the payment provider's hosted-checkout API.
//!
//! One call is made: `POST /v1/checkout/sessions`, form-encoded with
//! Stripe's bracketed key syntax, authenticated with the secret key.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use storefront_core::payment::{CheckoutProvider, CheckoutSession, CreateCheckout, PaymentError};

pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: &str, secret_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

/// Wire shape of a created session. Everything else Stripe returns is
/// ignored; the session stays opaque to us.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Flatten a checkout request into Stripe's bracketed form parameters.
fn session_params(req: &CreateCheckout) -> Vec<(String, String)> {
    vec![
        ("payment_method_types[0]".into(), "card".into()),
        ("line_items[0][price_data][currency]".into(), req.currency.clone()),
        ("line_items[0][price_data][product_data][name]".into(), req.product_name.clone()),
        ("line_items[0][price_data][unit_amount]".into(), req.unit_amount.to_string()),
        ("line_items[0][quantity]".into(), req.quantity.to_string()),
        ("mode".into(), "payment".into()),
        ("success_url".into(), req.success_url.clone()),
        ("cancel_url".into(), req.cancel_url.clone()),
    ]
}

#[async_trait]
impl CheckoutProvider for StripeGateway {
    async fn create_checkout(&self, req: &CreateCheckout) -> Result<CheckoutSession, PaymentError> {
        debug!(product = %req.product_name, amount = req.unit_amount, "Creating checkout session");

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&session_params(req))
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            warn!(%status, %message, "Checkout session creation rejected");
            return Err(PaymentError::Provider(message));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Protocol(e.to_string()))?;

        Ok(CheckoutSession { id: session.id, url: session.url })
    }
}
