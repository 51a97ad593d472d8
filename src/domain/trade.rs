//! Trade (fill) records returned by a venue or simulator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, Symbol, TradeId};
use super::money::{Amount, Price};

/// A single executed fill.
///
/// `amount` is signed the same way as the order that produced it: a sell
/// that reduces a long position carries a negative amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Venue-assigned trade ID.
    pub id: TradeId,
    /// Order this fill belongs to.
    pub order_id: OrderId,
    /// Traded symbol.
    pub symbol: Symbol,
    /// Signed filled amount.
    pub amount: Amount,
    /// Execution price.
    pub price: Price,
    /// Fee charged for this fill, in quote currency.
    pub fee: Decimal,
    /// Profit or loss realized by this fill, net of fee.
    pub realized_pnl: Decimal,
    /// When the fill was executed.
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Notional value of the fill (`|amount| * price`).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.amount.abs() * self.price
    }

    /// Returns true if this fill bought.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}
