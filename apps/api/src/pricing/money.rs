//! Fixed-point currency amounts.
//!
//! `Money` stores an integer count of minor units (öre). Arithmetic that can
//! produce fractions of a minor unit yields an `ExactAmount`, which keeps the
//! full decimal precision until `round()` converts it back to `Money` with
//! round-half-to-even. Only PricedRow and Totals fields are rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;

/// Number of decimal digits in one major unit (1 kr = 100 öre).
pub const MINOR_EXPONENT: u32 = 2;

const MINOR_PER_MAJOR: i64 = 100;
const CURRENCY_SUFFIX: &str = "kr";

/// How amounts are shown in the finished document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
    /// `12 500 kr`: whole kronor. Each printed amount is rounded on its own,
    /// so printed rows need not add up to the printed subtotal.
    WholeUnits,
    /// `12 500,50 kr`: exact to the öre.
    #[default]
    TwoDecimals,
}

impl std::str::FromStr for AmountFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole" | "whole_units" => Ok(AmountFormat::WholeUnits),
            "decimal" | "two_decimals" => Ok(AmountFormat::TwoDecimals),
            other => Err(format!("unknown amount format '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Money
// ────────────────────────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    minor_units: i64,
}

impl Money {
    pub const ZERO: Money = Money { minor_units: 0 };

    pub fn from_minor_units(minor_units: i64) -> Self {
        Money { minor_units }
    }

    /// Converts a decimal amount in kronor, rounding half-to-even to whole öre.
    pub fn from_decimal(amount: Decimal) -> Result<Self, DocumentError> {
        ExactAmount(amount).round()
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor_units, MINOR_EXPONENT)
    }

    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// `self * quantity`, unrounded. Rejects negative prices and quantities.
    pub fn multiply(&self, quantity: Decimal) -> Result<ExactAmount, DocumentError> {
        if self.is_negative() {
            return Err(DocumentError::invalid_amount(format!(
                "unit price {} is negative",
                self.to_decimal()
            )));
        }
        if quantity < Decimal::ZERO {
            return Err(DocumentError::invalid_amount(format!(
                "quantity {quantity} is negative"
            )));
        }
        ExactAmount(self.to_decimal()).checked_mul(quantity)
    }

    /// `self * rate`, unrounded. Used for tax.
    pub fn apply_rate(&self, rate: Decimal) -> Result<ExactAmount, DocumentError> {
        ExactAmount(self.to_decimal()).apply_rate(rate)
    }

    pub fn checked_add(self, other: Money) -> Result<Money, DocumentError> {
        self.minor_units
            .checked_add(other.minor_units)
            .map(Money::from_minor_units)
            .ok_or_else(|| DocumentError::invalid_amount("sum overflows the amount range"))
    }

    /// Sums already-rounded amounts. No rounding happens here.
    pub fn sum<I: IntoIterator<Item = Money>>(amounts: I) -> Result<Money, DocumentError> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Renders the amount with space-grouped thousands and the `kr` suffix.
    pub fn format(&self, policy: AmountFormat) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let minor = self.minor_units.unsigned_abs();
        let units = minor / MINOR_PER_MAJOR as u64;
        let cents = minor % MINOR_PER_MAJOR as u64;

        match policy {
            AmountFormat::WholeUnits => {
                // Half-to-even on the öre remainder.
                let round_up = cents > 50 || (cents == 50 && units % 2 == 1);
                let whole = if round_up { units + 1 } else { units };
                if whole == 0 {
                    return format!("0 {CURRENCY_SUFFIX}");
                }
                format!("{sign}{} {CURRENCY_SUFFIX}", group_thousands(whole))
            }
            AmountFormat::TwoDecimals => {
                let sign = if minor == 0 { "" } else { sign };
                format!(
                    "{sign}{},{cents:02} {CURRENCY_SUFFIX}",
                    group_thousands(units)
                )
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ExactAmount
// ────────────────────────────────────────────────────────────────────────────

/// An intermediate amount in kronor that has not been rounded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExactAmount(Decimal);

impl ExactAmount {
    /// Reduces the amount by `percent` (0..=100).
    pub fn apply_discount_percent(self, percent: Decimal) -> Result<ExactAmount, DocumentError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DocumentError::invalid_amount(format!(
                "discount {percent}% is outside 0..=100"
            )));
        }
        let kept = self.checked_mul(Decimal::ONE_HUNDRED - percent)?;
        kept.0
            .checked_div(Decimal::ONE_HUNDRED)
            .map(ExactAmount)
            .ok_or_else(|| DocumentError::invalid_amount("discounted amount is out of range"))
    }

    pub fn apply_rate(self, rate: Decimal) -> Result<ExactAmount, DocumentError> {
        if rate < Decimal::ZERO {
            return Err(DocumentError::invalid_amount(format!(
                "rate {rate} is negative"
            )));
        }
        self.checked_mul(rate)
    }

    /// Rounds half-to-even to the minor unit.
    pub fn round(self) -> Result<Money, DocumentError> {
        let rounded = self
            .0
            .round_dp_with_strategy(MINOR_EXPONENT, RoundingStrategy::MidpointNearestEven);
        rounded
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .and_then(|minor| minor.to_i64())
            .map(Money::from_minor_units)
            .ok_or_else(|| DocumentError::invalid_amount(format!("{} kr is out of range", self.0)))
    }

    fn checked_mul(self, factor: Decimal) -> Result<ExactAmount, DocumentError> {
        self.0
            .checked_mul(factor)
            .map(ExactAmount)
            .ok_or_else(|| DocumentError::invalid_amount("product overflows the amount range"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Display helpers
// ────────────────────────────────────────────────────────────────────────────

/// Formats a plain decimal (quantity, percentage) with a decimal comma and no
/// trailing zeros: `2`, `1,5`, `12,25`.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kr(units: i64) -> Money {
        Money::from_minor_units(units * 100)
    }

    // ── rounding ────────────────────────────────────────────────────────────

    #[test]
    fn test_round_half_to_even_at_minor_unit() {
        // 0.125 → 0.12 (2 is even), 0.135 → 0.14 (4 is even)
        assert_eq!(
            Money::from_decimal(Decimal::new(125, 3)),
            Ok(Money::from_minor_units(12))
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(135, 3)),
            Ok(Money::from_minor_units(14))
        );
    }

    #[test]
    fn test_intermediate_products_keep_precision() {
        // 0.333 kr * 3 = 0.999 kr → rounds once to 1.00 kr
        let price = Money::from_minor_units(33);
        let exact = price.multiply(Decimal::new(3, 0)).unwrap();
        assert_eq!(exact, ExactAmount(Decimal::new(99, 2)));

        let third = ExactAmount(Decimal::new(333, 3));
        let tripled = third.apply_rate(Decimal::new(3, 0)).unwrap();
        assert_eq!(tripled.round(), Ok(Money::from_minor_units(100)));
    }

    #[test]
    fn test_discount_applied_before_rounding() {
        // 1200 * 0.9 = 1080 exactly
        let total = kr(1200)
            .multiply(Decimal::ONE)
            .unwrap()
            .apply_discount_percent(Decimal::new(10, 0))
            .unwrap()
            .round()
            .unwrap();
        assert_eq!(total, kr(1080));
    }

    // ── validation ──────────────────────────────────────────────────────────

    #[test]
    fn test_negative_quantity_rejected() {
        let err = kr(10).multiply(Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidAmount { .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Money::from_minor_units(-1).multiply(Decimal::ONE).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidAmount { .. }));
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let base = kr(100).multiply(Decimal::ONE).unwrap();
        assert!(base.apply_discount_percent(Decimal::new(101, 0)).is_err());
        assert!(base.apply_discount_percent(Decimal::new(-5, 0)).is_err());
        assert!(base.apply_discount_percent(Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn test_add_overflow_is_invalid_amount() {
        let err = Money::from_minor_units(i64::MAX)
            .checked_add(Money::from_minor_units(1))
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidAmount { .. }));
    }

    // ── formatting ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_whole_units_groups_thousands() {
        assert_eq!(kr(4475).format(AmountFormat::WholeUnits), "4 475 kr");
        assert_eq!(kr(1_250_000).format(AmountFormat::WholeUnits), "1 250 000 kr");
        assert_eq!(kr(0).format(AmountFormat::WholeUnits), "0 kr");
        assert_eq!(kr(999).format(AmountFormat::WholeUnits), "999 kr");
    }

    #[test]
    fn test_format_whole_units_rounds_half_to_even() {
        assert_eq!(Money::from_minor_units(250).format(AmountFormat::WholeUnits), "2 kr");
        assert_eq!(Money::from_minor_units(350).format(AmountFormat::WholeUnits), "4 kr");
        assert_eq!(Money::from_minor_units(251).format(AmountFormat::WholeUnits), "3 kr");
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(
            Money::from_minor_units(12_345_678).format(AmountFormat::TwoDecimals),
            "123 456,78 kr"
        );
        assert_eq!(Money::from_minor_units(5).format(AmountFormat::TwoDecimals), "0,05 kr");
    }

    #[test]
    fn test_format_decimal_uses_comma() {
        assert_eq!(format_decimal(Decimal::new(150, 2)), "1,5");
        assert_eq!(format_decimal(Decimal::new(2, 0)), "2");
    }

    #[test]
    fn test_amount_format_parse() {
        assert_eq!("whole".parse::<AmountFormat>(), Ok(AmountFormat::WholeUnits));
        assert_eq!("DECIMAL".parse::<AmountFormat>(), Ok(AmountFormat::TwoDecimals));
        assert!("cents".parse::<AmountFormat>().is_err());
    }
}
