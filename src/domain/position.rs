//! Open and closed position records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Symbol;
use super::money::{Amount, Price};
use super::trade::Trade;

/// One open exposure to a symbol.
///
/// `amount` is signed: positive is long, negative is short. A position
/// tracked in [`StrategyState`](super::state::StrategyState) never has a
/// zero amount; it is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Traded symbol.
    pub symbol: Symbol,
    /// Signed open amount.
    pub amount: Amount,
    /// Average entry price.
    pub base_price: Price,
    /// When the position was opened.
    pub opened_at: DateTime<Utc>,
    /// Fills folded into this position, oldest first.
    #[serde(default)]
    pub trades: Vec<Trade>,
}

impl Position {
    /// Create a validated open position.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroAmount`] for a zero amount and
    /// [`DomainError::NegativePrice`] for a negative base price.
    pub fn try_new(
        symbol: Symbol,
        amount: Amount,
        base_price: Price,
    ) -> Result<Self, DomainError> {
        if amount.is_zero() {
            return Err(DomainError::ZeroAmount { symbol });
        }
        if base_price < Decimal::ZERO {
            return Err(DomainError::NegativePrice { price: base_price });
        }
        Ok(Self {
            symbol,
            amount,
            base_price,
            opened_at: Utc::now(),
            trades: Vec::new(),
        })
    }

    /// Returns true if the record can be tracked under `key`.
    #[must_use]
    pub fn is_well_formed(&self, key: &Symbol) -> bool {
        !self.amount.is_zero() && &self.symbol == key
    }

    /// Returns true if the position is long.
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the position is short.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Finalize this record into its terminal closed form.
    #[must_use]
    pub fn into_closed(self, closing_price: Price, closed_at: DateTime<Utc>) -> ClosedPosition {
        ClosedPosition {
            position: self,
            closing_price,
            closed_at,
        }
    }
}

/// A position whose closing trade has been reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPosition {
    /// The position as it stood after the closing fill was folded in.
    #[serde(flatten)]
    pub position: Position,
    /// Price of the closing fill.
    pub closing_price: Price,
    /// When the close was reconciled.
    pub closed_at: DateTime<Utc>,
}

impl ClosedPosition {
    /// Traded symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.position.symbol
    }

    /// Fills of the position, including the closing one.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.position.trades
    }
}
