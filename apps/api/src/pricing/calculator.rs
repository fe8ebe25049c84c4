//! Line pricing and document totals.
//!
//! `price` is pure: the same items and tax rate always produce the same rounded
//! rows and totals. Totals are derived once from the full row set; the
//! subtotal is the exact sum of the rounded line totals, so rows printed to
//! the öre add up to the printed subtotal.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::DocumentError;
use crate::models::document::LineItemInput;
use crate::pricing::money::Money;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A validated line item. Construction rejects out-of-range values instead of clamping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    name: String,
    quantity: Decimal,
    unit_price: Money,
    discount_percent: Decimal,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        unit_price: Money,
        discount_percent: Decimal,
    ) -> Result<Self, DocumentError> {
        let name = name.into();
        if quantity < Decimal::ZERO {
            return Err(DocumentError::invalid_amount(format!(
                "quantity {quantity} for '{name}' is negative"
            )));
        }
        if unit_price.is_negative() {
            return Err(DocumentError::invalid_amount(format!(
                "unit price {} for '{name}' is negative",
                unit_price.to_decimal()
            )));
        }
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(DocumentError::invalid_amount(format!(
                "discount {discount_percent}% for '{name}' is outside 0..=100"
            )));
        }
        Ok(LineItem {
            name,
            quantity,
            unit_price,
            discount_percent,
        })
    }

    /// Builds a line item from the request payload. The unit price is taken
    /// to whole öre before validation.
    pub fn from_input(input: &LineItemInput) -> Result<Self, DocumentError> {
        if input.unit_price < Decimal::ZERO {
            return Err(DocumentError::invalid_amount(format!(
                "unit price {} for '{}' is negative",
                input.unit_price, input.name
            )));
        }
        LineItem::new(
            input.name.clone(),
            input.quantity,
            Money::from_decimal(input.unit_price)?,
            input.discount_percent,
        )
    }
}

/// A line item with its rounded total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedRow {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Money,
    pub discount_percent: Decimal,
    pub line_total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItems {
    pub rows: Vec<PricedRow>,
    pub totals: Totals,
}

// ────────────────────────────────────────────────────────────────────────────
// Pricing
// ────────────────────────────────────────────────────────────────────────────

/// Prices every item and derives the document totals.
///
/// `require_items` is the caller's policy: quotes may be empty, agreements
/// usually may not. An empty set under that policy is `EmptyItemSet`.
pub fn price(
    items: &[LineItem],
    tax_rate: Decimal,
    require_items: bool,
) -> Result<PricedItems, DocumentError> {
    if require_items && items.is_empty() {
        return Err(DocumentError::EmptyItemSet);
    }
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(DocumentError::invalid_amount(format!(
            "tax rate {tax_rate} is outside 0..=1"
        )));
    }

    let rows = items
        .iter()
        .map(price_row)
        .collect::<Result<Vec<_>, _>>()?;

    let subtotal = Money::sum(rows.iter().map(|r| r.line_total))?;
    let tax = subtotal.apply_rate(tax_rate)?.round()?;
    let grand_total = subtotal.checked_add(tax)?;

    Ok(PricedItems {
        rows,
        totals: Totals {
            subtotal,
            tax,
            grand_total,
            tax_rate,
        },
    })
}

/// `round(quantity * unit_price * (1 - discount/100))`, rounded once at the end.
fn price_row(item: &LineItem) -> Result<PricedRow, DocumentError> {
    let line_total = item
        .unit_price
        .multiply(item.quantity)?
        .apply_discount_percent(item.discount_percent)?
        .round()?;

    Ok(PricedRow {
        name: item.name.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        discount_percent: item.discount_percent,
        line_total,
    })
}
