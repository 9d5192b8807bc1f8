//! Order total composition: sum of line prices, discount applied before tax.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::order::OrderLine;

/// Round a money amount to two decimal places, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of unit price x quantity across all lines.
pub fn subtotal(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.unit_price * Decimal::from(l.quantity))
        .sum()
}

/// Apply a percentage discount, then a percentage tax, to a subtotal.
/// Both percents are optional; `None` means no adjustment of that kind.
pub fn apply_adjustments(
    subtotal: Decimal,
    discount_percent: Option<Decimal>,
    tax_percent: Option<Decimal>,
) -> Decimal {
    let mut total = subtotal;
    if let Some(d) = discount_percent {
        total *= Decimal::ONE - d / Decimal::ONE_HUNDRED;
    }
    if let Some(t) = tax_percent {
        total *= Decimal::ONE + t / Decimal::ONE_HUNDRED;
    }
    round_money(total)
}

/// Convert a major-unit amount to provider minor units (cents).
/// Returns `None` for negative amounts or i64 overflow.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    if amount.is_sign_negative() {
        return None;
    }
    round_money(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(price: Decimal, quantity: u32) -> OrderLine {
        OrderLine {
            item_id: Uuid::new_v4(),
            name: "line".to_string(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let lines = vec![line(dec!(9.99), 3), line(dec!(0.01), 1)];
        assert_eq!(subtotal(&lines), dec!(29.98));
    }

    #[test]
    fn empty_order_has_zero_subtotal() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn discount_applies_before_tax() {
        // 100 - 10% = 90, + 20% tax = 108. Tax-first would give 108 too,
        // but with rounding-sensitive values the order matters:
        // 99.99 - 15% = 84.9915, + 7% = 90.940905 -> 90.94
        let total = apply_adjustments(dec!(99.99), Some(dec!(15)), Some(dec!(7)));
        assert_eq!(total, dec!(90.94));
    }

    #[test]
    fn full_discount_zeroes_the_total() {
        let total = apply_adjustments(dec!(42.00), Some(dec!(100)), Some(dec!(20)));
        assert_eq!(total, dec!(0.00));
    }

    #[test]
    fn no_adjustments_only_rounds() {
        assert_eq!(apply_adjustments(dec!(10.005), None, None), dec!(10.01));
    }

    #[test]
    fn minor_units_truncate_to_cents() {
        assert_eq!(to_minor_units(dec!(12.34)), Some(1234));
        assert_eq!(to_minor_units(dec!(0)), Some(0));
        assert_eq!(to_minor_units(dec!(-1)), None);
    }

    #[test]
    fn minor_units_overflow_is_none() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
    }
}
