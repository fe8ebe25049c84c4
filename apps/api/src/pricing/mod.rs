// Money arithmetic and line pricing backing the quote and agreement tables.
// Everything here is pure; rounding happens only where a value is stored.

pub mod calculator;
pub mod money;

pub use calculator::{price, LineItem, PricedItems, PricedRow, Totals};
pub use money::{format_decimal, AmountFormat, Money};
