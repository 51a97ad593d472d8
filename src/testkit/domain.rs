//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    Order, OrderId, OrderMeta, OrderType, Position, StrategyState, Symbol, Trade, TradeId,
};

/// Create a [`Symbol`] from a string.
pub fn symbol(id: &str) -> Symbol {
    Symbol::new(id)
}

/// Open position with no fills recorded.
///
/// # Panics
///
/// Panics on a zero amount or negative price.
pub fn position(symbol: &str, amount: Decimal, base_price: Decimal) -> Position {
    Position::try_new(Symbol::new(symbol), amount, base_price).expect("valid test position")
}

/// State holding the given open positions.
pub fn state_with(positions: impl IntoIterator<Item = Position>) -> StrategyState {
    positions
        .into_iter()
        .fold(StrategyState::new(), StrategyState::with_position)
}

/// Trade fill with zero fee.
pub fn trade(symbol: &str, amount: Decimal, price: Decimal, realized_pnl: Decimal) -> Trade {
    Trade {
        id: TradeId::random(),
        order_id: OrderId::random(),
        symbol: Symbol::new(symbol),
        amount,
        price,
        fee: Decimal::ZERO,
        realized_pnl,
        executed_at: Utc::now(),
    }
}

/// Market order that produced `trade`.
pub fn order_for(trade: &Trade) -> Order {
    Order {
        id: trade.order_id.clone(),
        symbol: trade.symbol.clone(),
        amount: trade.amount,
        price_avg: trade.price,
        order_type: OrderType::Market,
        created_at: trade.executed_at,
        meta: OrderMeta::new(),
    }
}
