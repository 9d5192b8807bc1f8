use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Which way a percentage modifier moves an order total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentKind {
    Discount,
    Tax,
}

/// A percentage modifier attachable to orders: a discount or a tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: Uuid,
    pub kind: AdjustmentKind,
    pub label: String,
    /// Percent of the order subtotal, two decimal places.
    pub percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentDraft {
    pub label: String,
    pub percent: Decimal,
}

impl AdjustmentDraft {
    pub fn validate(&self, kind: AdjustmentKind) -> CoreResult<AdjustmentDraft> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(CoreError::ValidationError("Label must not be empty".into()));
        }
        if self.percent.is_sign_negative() {
            return Err(CoreError::ValidationError("Percent must not be negative".into()));
        }
        if kind == AdjustmentKind::Discount && self.percent > Decimal::ONE_HUNDRED {
            return Err(CoreError::ValidationError("Discount cannot exceed 100%".into()));
        }
        Ok(AdjustmentDraft {
            label: label.to_string(),
            percent: self.percent.round_dp(2),
        })
    }
}
