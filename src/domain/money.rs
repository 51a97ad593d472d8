//! Monetary types for price and amount representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Signed order or position amount. Positive is long, negative is short.
pub type Amount = Decimal;
