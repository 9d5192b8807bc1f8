use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

pub const MAX_NAME_LEN: usize = 255;

/// A purchasable product in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in major units, two decimal places.
    pub price: Decimal,
    /// Lowercase ISO 4217 code, e.g. "usd".
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: Option<String>,
}

impl ItemDraft {
    /// Validate the draft and normalize the currency code.
    pub fn validate(&self, default_currency: &str) -> CoreResult<ValidItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Item name must not be empty".into()));
        }
        // VARCHAR(255) counts characters, not bytes
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CoreError::ValidationError(format!(
                "Item name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if self.price.is_sign_negative() {
            return Err(CoreError::ValidationError("Item price must not be negative".into()));
        }

        let currency = self
            .currency
            .as_deref()
            .unwrap_or(default_currency)
            .trim()
            .to_ascii_lowercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!("Invalid currency code: {currency}")));
        }

        Ok(ValidItem {
            name: name.to_string(),
            description: self.description.clone(),
            price: crate::pricing::round_money(self.price),
            currency,
        })
    }
}

/// A draft that passed validation; prices rounded, currency normalized.
#[derive(Debug, Clone)]
pub struct ValidItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
}

impl ValidItem {
    pub fn into_item(self, id: Uuid, now: DateTime<Utc>) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            currency: self.currency,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters for the admin item listing. Results are ordered by name.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring match on the name.
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(name: &str, price: Decimal, currency: Option<&str>) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            description: "desc".to_string(),
            price,
            currency: currency.map(str::to_string),
        }
    }

    #[test]
    fn validates_and_normalizes() {
        let valid = draft("  Mug ", dec!(12.505), Some("USD")).validate("eur").unwrap();
        assert_eq!(valid.name, "Mug");
        assert_eq!(valid.price, dec!(12.51));
        assert_eq!(valid.currency, "usd");
    }

    #[test]
    fn falls_back_to_default_currency() {
        let valid = draft("Mug", dec!(5), None).validate("eur").unwrap();
        assert_eq!(valid.currency, "eur");
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 200 two-byte characters: within the 255-char bound despite 400 bytes
        let valid = draft(&"é".repeat(200), dec!(1), None).validate("usd").unwrap();
        assert_eq!(valid.name.chars().count(), 200);

        assert!(draft(&"é".repeat(256), dec!(1), None).validate("usd").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(draft("   ", dec!(1), None).validate("usd").is_err());
    }

    #[test]
    fn rejects_negative_price() {
        assert!(draft("Mug", dec!(-0.01), None).validate("usd").is_err());
    }

    #[test]
    fn rejects_bad_currency() {
        assert!(draft("Mug", dec!(1), Some("dollars")).validate("usd").is_err());
    }
}
