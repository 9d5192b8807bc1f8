use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::adjustment::{Adjustment, AdjustmentDraft, AdjustmentKind};
use storefront_core::item::{Item, ItemDraft, ItemFilter};
use storefront_core::order::{Order, OrderDraft, OrderLine, OrderStatus};
use storefront_core::pricing;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            currency: item.currency,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub status: OrderStatus,
    pub lines: Vec<OrderLineResponse>,
    pub discount_id: Option<Uuid>,
    pub tax_id: Option<Uuid>,
    pub total_price: Decimal,
    pub currency: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub item_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            lines: order
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    item_id: l.item_id,
                    name: l.name,
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                })
                .collect(),
            discount_id: order.discount_id,
            tax_id: order.tax_id,
            total_price: order.total_price,
            currency: order.currency,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub id: Uuid,
    pub label: String,
    pub percent: Decimal,
}

impl From<Adjustment> for AdjustmentResponse {
    fn from(adj: Adjustment) -> Self {
        Self { id: adj.id, label: adj.label, percent: adj.percent }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/items", get(list_items).post(create_item))
        .route(
            "/v1/admin/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/v1/admin/orders", get(list_orders).post(create_order))
        .route(
            "/v1/admin/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/v1/admin/orders/{id}/status", put(update_order_status))
        .route("/v1/admin/discounts", get(list_discounts).post(create_discount))
        .route(
            "/v1/admin/discounts/{id}",
            get(get_discount).put(update_discount).delete(delete_discount),
        )
        .route("/v1/admin/taxes", get(list_taxes).post(create_tax))
        .route(
            "/v1/admin/taxes/{id}",
            get(get_tax).put(update_tax).delete(delete_tax),
        )
}

fn internal(e: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    AppError::InternalServerError(e.to_string())
}

fn kind_name(kind: AdjustmentKind) -> &'static str {
    match kind {
        AdjustmentKind::Discount => "discount",
        AdjustmentKind::Tax => "tax",
    }
}

// ============================================================================
// Item Handlers
// ============================================================================

/// POST /v1/admin/items
async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<ItemDraft>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let valid = req
        .validate(&state.checkout.default_currency)
        .map_err(AppError::from_core)?;

    let item = state.items.create_item(valid).await.map_err(internal)?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /v1/admin/items
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let filter = ItemFilter {
        name: query.name,
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let items = state.items.list_items(&filter).await.map_err(internal)?;

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /v1/admin/items/:id
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = state
        .items
        .get_item(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError(format!("No item with id {id}")))?;

    Ok(Json(item.into()))
}

/// PUT /v1/admin/items/:id
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ItemDraft>,
) -> Result<Json<ItemResponse>, AppError> {
    let valid = req
        .validate(&state.checkout.default_currency)
        .map_err(AppError::from_core)?;

    let item = state
        .items
        .update_item(id, valid)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError(format!("No item with id {id}")))?;

    Ok(Json(item.into()))
}

/// DELETE /v1/admin/items/:id
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.items.delete_item(id).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("No item with id {id}")))
    }
}

// ============================================================================
// Order Handlers
// ============================================================================

/// Resolve an optional adjustment reference, verifying it exists.
async fn resolve_percent(
    state: &AppState,
    kind: AdjustmentKind,
    id: Option<Uuid>,
) -> Result<Option<Decimal>, AppError> {
    let Some(id) = id else { return Ok(None) };

    let adjustment = state
        .adjustments
        .get_adjustment(kind, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::ValidationError(format!("Unknown {} id {id}", kind_name(kind))))?;

    Ok(Some(adjustment.percent))
}

/// Turn line drafts into priced lines by snapshotting the referenced
/// items, and derive the order currency. All items must agree on it.
async fn build_lines(
    state: &AppState,
    draft: &OrderDraft,
) -> Result<(Vec<OrderLine>, String), AppError> {
    let mut lines = Vec::with_capacity(draft.lines.len());
    let mut currency: Option<String> = None;

    for line in &draft.lines {
        let item = state
            .items
            .get_item(line.item_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                AppError::ValidationError(format!("Unknown item id {}", line.item_id))
            })?;

        match &currency {
            None => currency = Some(item.currency.clone()),
            Some(c) if *c != item.currency => {
                return Err(AppError::ValidationError(
                    "All order items must share one currency".to_string(),
                ));
            }
            Some(_) => {}
        }

        lines.push(OrderLine {
            item_id: item.id,
            name: item.name,
            unit_price: item.price,
            quantity: line.quantity,
        });
    }

    // validate() guarantees at least one line, so currency is set
    let currency = currency
        .ok_or_else(|| AppError::ValidationError("Order must contain at least one line".into()))?;

    Ok((lines, currency))
}

async fn price_order(
    state: &AppState,
    draft: &OrderDraft,
) -> Result<(Vec<OrderLine>, String, Decimal), AppError> {
    draft.validate().map_err(AppError::from_core)?;

    let (lines, currency) = build_lines(state, draft).await?;
    let discount = resolve_percent(state, AdjustmentKind::Discount, draft.discount_id).await?;
    let tax = resolve_percent(state, AdjustmentKind::Tax, draft.tax_id).await?;

    let total = pricing::apply_adjustments(pricing::subtotal(&lines), discount, tax);

    Ok((lines, currency, total))
}

/// POST /v1/admin/orders
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderDraft>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let (lines, currency, total) = price_order(&state, &req).await?;

    let now = chrono::Utc::now();
    let order = Order {
        id: Uuid::new_v4(),
        status: OrderStatus::Pending,
        lines,
        discount_id: req.discount_id,
        tax_id: req.tax_id,
        total_price: total,
        currency,
        created_at: now,
        updated_at: now,
    };

    state.orders.create_order(&order).await.map_err(internal)?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /v1/admin/orders
async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.orders.list_orders().await.map_err(internal)?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /v1/admin/orders/:id
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .orders
        .get_order(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError(format!("No order with id {id}")))?;

    Ok(Json(order.into()))
}

/// PUT /v1/admin/orders/:id
/// Replace the order's lines and adjustment references; the total is
/// recomputed server-side.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrderDraft>,
) -> Result<Json<OrderResponse>, AppError> {
    let (lines, currency, total) = price_order(&state, &req).await?;

    let updated = state
        .orders
        .update_order(id, &lines, req.discount_id, req.tax_id, &currency, total)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::NotFoundError(format!("No order with id {id}")));
    }

    let order = state
        .orders
        .get_order(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::InternalServerError("Order vanished during update".to_string()))?;

    Ok(Json(order.into()))
}

/// PUT /v1/admin/orders/:id/status
async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<StatusCode, AppError> {
    if state
        .orders
        .update_order_status(id, req.status)
        .await
        .map_err(internal)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("No order with id {id}")))
    }
}

/// DELETE /v1/admin/orders/:id
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.orders.delete_order(id).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("No order with id {id}")))
    }
}

// ============================================================================
// Discount / Tax Handlers
// ============================================================================

async fn create_adjustment(
    state: &AppState,
    kind: AdjustmentKind,
    req: AdjustmentDraft,
) -> Result<(StatusCode, Json<AdjustmentResponse>), AppError> {
    let draft = req.validate(kind).map_err(AppError::from_core)?;
    let adjustment = state
        .adjustments
        .create_adjustment(kind, draft)
        .await
        .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(adjustment.into())))
}

async fn list_adjustments(
    state: &AppState,
    kind: AdjustmentKind,
) -> Result<Json<Vec<AdjustmentResponse>>, AppError> {
    let adjustments = state.adjustments.list_adjustments(kind).await.map_err(internal)?;
    Ok(Json(adjustments.into_iter().map(AdjustmentResponse::from).collect()))
}

async fn get_adjustment(
    state: &AppState,
    kind: AdjustmentKind,
    id: Uuid,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let adjustment = state
        .adjustments
        .get_adjustment(kind, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError(format!("No {} with id {id}", kind_name(kind))))?;

    Ok(Json(adjustment.into()))
}

async fn update_adjustment(
    state: &AppState,
    kind: AdjustmentKind,
    id: Uuid,
    req: AdjustmentDraft,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let draft = req.validate(kind).map_err(AppError::from_core)?;
    let adjustment = state
        .adjustments
        .update_adjustment(kind, id, draft)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError(format!("No {} with id {id}", kind_name(kind))))?;

    Ok(Json(adjustment.into()))
}

async fn delete_adjustment(
    state: &AppState,
    kind: AdjustmentKind,
    id: Uuid,
) -> Result<StatusCode, AppError> {
    if state
        .adjustments
        .delete_adjustment(kind, id)
        .await
        .map_err(internal)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("No {} with id {id}", kind_name(kind))))
    }
}

/// POST /v1/admin/discounts
async fn create_discount(
    State(state): State<AppState>,
    Json(req): Json<AdjustmentDraft>,
) -> Result<(StatusCode, Json<AdjustmentResponse>), AppError> {
    create_adjustment(&state, AdjustmentKind::Discount, req).await
}

/// GET /v1/admin/discounts
async fn list_discounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdjustmentResponse>>, AppError> {
    list_adjustments(&state, AdjustmentKind::Discount).await
}

/// GET /v1/admin/discounts/:id
async fn get_discount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    get_adjustment(&state, AdjustmentKind::Discount, id).await
}

/// PUT /v1/admin/discounts/:id
async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustmentDraft>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    update_adjustment(&state, AdjustmentKind::Discount, id, req).await
}

/// DELETE /v1/admin/discounts/:id
async fn delete_discount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_adjustment(&state, AdjustmentKind::Discount, id).await
}

/// POST /v1/admin/taxes
async fn create_tax(
    State(state): State<AppState>,
    Json(req): Json<AdjustmentDraft>,
) -> Result<(StatusCode, Json<AdjustmentResponse>), AppError> {
    create_adjustment(&state, AdjustmentKind::Tax, req).await
}

/// GET /v1/admin/taxes
async fn list_taxes(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdjustmentResponse>>, AppError> {
    list_adjustments(&state, AdjustmentKind::Tax).await
}

/// GET /v1/admin/taxes/:id
async fn get_tax(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    get_adjustment(&state, AdjustmentKind::Tax, id).await
}

/// PUT /v1/admin/taxes/:id
async fn update_tax(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustmentDraft>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    update_adjustment(&state, AdjustmentKind::Tax, id, req).await
}

/// DELETE /v1/admin/taxes/:id
async fn delete_tax(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_adjustment(&state, AdjustmentKind::Tax, id).await
}
