use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::payment::{CreateCheckout, PaymentSession, SessionStatus};
use storefront_core::pricing;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct BuyQuery {
    /// Overrides the item's own currency when present.
    pub currency: Option<String>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BuyResponse {
    pub session_id: String,
    pub url: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/buy/{id}", get(buy_item))
}

/// GET /buy/:id
/// Create a hosted checkout session for the item and hand back the
/// provider's session id plus the hosted-page URL.
async fn buy_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Query(query): Query<BuyQuery>,
) -> Result<Json<BuyResponse>, AppError> {
    let item = state
        .items
        .get_item(item_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("No item with id {item_id}")))?;

    let quantity = query.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::ValidationError("Quantity must be at least 1".to_string()));
    }

    let currency = query
        .currency
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or_else(|| item.currency.clone());

    let unit_amount = pricing::to_minor_units(item.price).ok_or_else(|| {
        AppError::InternalServerError(format!("Item {item_id} price is not representable"))
    })?;

    // Reject unpayable totals before anything reaches the provider.
    let amount = unit_amount
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::ValidationError("Quantity too large for this item".to_string()))?;

    let request = CreateCheckout {
        product_name: item.name.clone(),
        currency: currency.clone(),
        unit_amount,
        quantity,
        success_url: state.checkout.success_url.clone(),
        cancel_url: state.checkout.cancel_url.clone(),
    };

    let session = state
        .checkout_provider
        .create_checkout(&request)
        .await
        .map_err(|e| AppError::UpstreamError(e.to_string()))?;

    // Track the session locally so the webhook can resolve it later.
    let record = PaymentSession {
        session_id: session.id.clone(),
        item_id,
        quantity,
        amount,
        currency,
        status: SessionStatus::Open,
        created_at: Utc::now(),
    };
    state
        .sessions
        .record_session(&record)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!(item = %item_id, session = %session.id, "Checkout session created");

    Ok(Json(BuyResponse { session_id: session.id, url: session.url }))
}
