use std::sync::Arc;

use storefront_core::payment::CheckoutProvider;
use storefront_core::repository::{
    AdjustmentRepository, ItemRepository, OrderRepository, PaymentSessionRepository,
};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub admin_username: String,
    pub admin_password: String,
}

/// Checkout settings handed to the buy flow and the item page.
#[derive(Clone)]
pub struct CheckoutConfig {
    pub publishable_key: String,
    pub success_url: String,
    pub cancel_url: String,
    pub default_currency: String,
}

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub adjustments: Arc<dyn AdjustmentRepository>,
    pub sessions: Arc<dyn PaymentSessionRepository>,
    pub checkout_provider: Arc<dyn CheckoutProvider>,
    pub checkout: CheckoutConfig,
    pub auth: AuthConfig,
}
