//! Position arithmetic adapters.

use rust_decimal::prelude::Signed;
use rust_decimal::Decimal;

use crate::domain::{ClosedPosition, Position, Trade};
use crate::port::{PnlCalculator, PositionUpdater};

/// Folds fills into a position with a weighted-average entry price.
///
/// Adding to the position re-averages the base price, reducing it keeps the
/// base price, and flipping sides restarts it at the fill price.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedAveragePositionUpdater;

impl PositionUpdater for WeightedAveragePositionUpdater {
    fn apply(&self, mut position: Position, trade: &Trade) -> Position {
        let prev = position.amount;
        let next = prev + trade.amount;

        position.base_price = if prev.is_zero() {
            trade.price
        } else if prev.signum() == trade.amount.signum() {
            let held = prev.abs();
            let added = trade.amount.abs();
            (held * position.base_price + added * trade.price) / (held + added)
        } else if next.is_zero() || next.signum() == prev.signum() {
            position.base_price
        } else {
            trade.price
        };

        position.amount = next;
        position.trades.push(trade.clone());
        position
    }
}

/// Realized PnL of a position as the sum of its fills' realized PnL.
#[derive(Debug, Default, Clone, Copy)]
pub struct TradeSumPnlCalculator;

impl PnlCalculator for TradeSumPnlCalculator {
    fn realized(&self, position: &ClosedPosition) -> Decimal {
        position.trades().iter().map(|t| t.realized_pnl).sum()
    }
}

/// PnL a fill of `amount` at `price` realizes against `position`, before fees.
///
/// Returns `None` if the arithmetic overflows.
#[must_use]
pub fn realized_against(
    position: Option<&Position>,
    amount: Decimal,
    price: Decimal,
) -> Option<Decimal> {
    match position {
        Some(p) if !p.amount.is_zero() && p.amount.signum() != amount.signum() => {
            let closed = amount.abs().min(p.amount.abs());
            price
                .checked_sub(p.base_price)?
                .checked_mul(closed)?
                .checked_mul(p.amount.signum())
        }
        _ => Some(Decimal::ZERO),
    }
}
