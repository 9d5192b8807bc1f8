use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(CoreError::InternalError(format!("Unknown order status: {other}"))),
        }
    }
}

/// One item position within an order. Name and unit price are snapshots
/// taken when the line is added, so later catalog edits do not rewrite
/// existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub discount_id: Option<Uuid>,
    pub tax_id: Option<Uuid>,
    /// Derived: subtotal of lines with discount and tax applied. Never
    /// accepted from a client.
    pub total_price: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied order contents: item references plus optional
/// adjustment references. Prices and totals are resolved server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<LineDraft>,
    pub discount_id: Option<Uuid>,
    pub tax_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDraft {
    pub item_id: Uuid,
    pub quantity: u32,
}

impl OrderDraft {
    pub fn validate(&self) -> CoreResult<()> {
        if self.lines.is_empty() {
            return Err(CoreError::ValidationError("Order must contain at least one line".into()));
        }
        if self.lines.iter().any(|l| l.quantity == 0) {
            return Err(CoreError::ValidationError("Line quantity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in [OrderStatus::Pending, OrderStatus::Paid, OrderStatus::Cancelled] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("SHIPPED").is_err());
    }

    #[test]
    fn draft_requires_lines_and_quantities() {
        let empty = OrderDraft { lines: vec![], discount_id: None, tax_id: None };
        assert!(empty.validate().is_err());

        let zero_qty = OrderDraft {
            lines: vec![LineDraft { item_id: Uuid::new_v4(), quantity: 0 }],
            discount_id: None,
            tax_id: None,
        };
        assert!(zero_qty.validate().is_err());

        let ok = OrderDraft {
            lines: vec![LineDraft { item_id: Uuid::new_v4(), quantity: 2 }],
            discount_id: None,
            tax_id: None,
        };
        assert!(ok.validate().is_ok());
    }
}
