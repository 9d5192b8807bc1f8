use async_trait::async_trait;
use uuid::Uuid;

use crate::adjustment::{Adjustment, AdjustmentDraft, AdjustmentKind};
use crate::item::{Item, ItemFilter, ValidItem};
use crate::order::{Order, OrderLine, OrderStatus};
use crate::payment::{PaymentSession, SessionStatus};

type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for catalog item access
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create_item(&self, item: ValidItem) -> Result<Item, RepoError>;

    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, RepoError>;

    /// List items matching the filter, ordered by name.
    async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError>;

    /// Replace the mutable fields of an item. Returns the updated item,
    /// or `None` if no such item exists.
    async fn update_item(&self, id: Uuid, item: ValidItem) -> Result<Option<Item>, RepoError>;

    /// Returns `true` if an item was deleted.
    async fn delete_item(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// Repository trait for order access. Implementations persist the order
/// header and its lines atomically.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &Order) -> Result<(), RepoError>;

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError>;

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError>;

    /// Replace lines, adjustment references, currency and total of an
    /// existing order. Returns `false` if no such order exists.
    async fn update_order(
        &self,
        id: Uuid,
        lines: &[OrderLine],
        discount_id: Option<Uuid>,
        tax_id: Option<Uuid>,
        currency: &str,
        total_price: rust_decimal::Decimal,
    ) -> Result<bool, RepoError>;

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> Result<bool, RepoError>;

    async fn delete_order(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// Repository trait for discounts and taxes. The kind discriminates which
/// of the two tables a call addresses.
#[async_trait]
pub trait AdjustmentRepository: Send + Sync {
    async fn create_adjustment(
        &self,
        kind: AdjustmentKind,
        draft: AdjustmentDraft,
    ) -> Result<Adjustment, RepoError>;

    async fn get_adjustment(
        &self,
        kind: AdjustmentKind,
        id: Uuid,
    ) -> Result<Option<Adjustment>, RepoError>;

    async fn list_adjustments(&self, kind: AdjustmentKind) -> Result<Vec<Adjustment>, RepoError>;

    async fn update_adjustment(
        &self,
        kind: AdjustmentKind,
        id: Uuid,
        draft: AdjustmentDraft,
    ) -> Result<Option<Adjustment>, RepoError>;

    async fn delete_adjustment(&self, kind: AdjustmentKind, id: Uuid) -> Result<bool, RepoError>;
}

/// Repository trait for local checkout-session records.
#[async_trait]
pub trait PaymentSessionRepository: Send + Sync {
    async fn record_session(&self, session: &PaymentSession) -> Result<(), RepoError>;

    async fn get_session(&self, session_id: &str) -> Result<Option<PaymentSession>, RepoError>;

    /// Returns `false` if no session with that provider id is recorded.
    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<bool, RepoError>;
}
