//! Order request and filled order types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::{OrderId, Symbol};
use super::money::{Amount, Price};

/// Venue-specific fields carried through validation and submission untouched.
pub type OrderMeta = BTreeMap<String, Value>;

/// Order execution type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Fill at the prevailing price.
    #[default]
    Market,
    /// Fill at the given limit price.
    Limit,
}

impl OrderType {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderParams {
    /// Symbol to trade. Resolved to the strategy default when absent.
    #[serde(default)]
    pub symbol: Option<Symbol>,
    /// Signed order amount.
    pub amount: Amount,
    /// Execution type.
    #[serde(default)]
    pub order_type: OrderType,
    /// Limit price, required for limit orders.
    #[serde(default)]
    pub price: Option<Price>,
    /// Opaque venue fields.
    #[serde(default)]
    pub meta: OrderMeta,
}

impl OrderParams {
    /// Create a market order for `amount` with no explicit symbol.
    #[must_use]
    pub fn market(amount: Amount) -> Self {
        Self {
            symbol: None,
            amount,
            order_type: OrderType::Market,
            price: None,
            meta: OrderMeta::new(),
        }
    }

    /// Create a limit order for `amount` at `price` with no explicit symbol.
    #[must_use]
    pub fn limit(amount: Amount, price: Price) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(amount)
        }
    }

    /// Set the symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Attach a venue-specific field.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

/// An order as acknowledged and filled by the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Venue-assigned order ID.
    pub id: OrderId,
    /// Traded symbol.
    pub symbol: Symbol,
    /// Signed order amount.
    pub amount: Amount,
    /// Average fill price.
    pub price_avg: Price,
    /// Execution type.
    pub order_type: OrderType,
    /// When the venue accepted the order.
    pub created_at: DateTime<Utc>,
    /// Venue fields echoed from the request.
    #[serde(default)]
    pub meta: OrderMeta,
}
