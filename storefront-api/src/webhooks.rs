use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use storefront_core::payment::SessionStatus;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StripeWebhook {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: SessionObject,
}

#[derive(Debug, Deserialize)]
pub struct SessionObject {
    pub id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/webhooks/stripe", post(handle_stripe_webhook))
}

/// POST /v1/webhooks/stripe
/// Receive checkout session status updates from Stripe
async fn handle_stripe_webhook(
    State(state): State<AppState>,
    Json(payload): Json<StripeWebhook>,
) -> Result<StatusCode, StatusCode> {
    tracing::info!("Received webhook: {} for session {}", payload.type_, payload.data.object.id);

    let status = match payload.type_.as_str() {
        "checkout.session.completed" => SessionStatus::Completed,
        "checkout.session.expired" => SessionStatus::Expired,
        // Unknown events are acknowledged so the provider stops retrying
        _ => return Ok(StatusCode::OK),
    };

    let session_id = &payload.data.object.id;
    let updated = state
        .sessions
        .update_session_status(session_id, status)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if updated {
        tracing::info!("Session {} marked {:?} via webhook", session_id, status);
    } else {
        tracing::warn!("Webhook for unknown session {}", session_id);
    }

    Ok(StatusCode::OK)
}
