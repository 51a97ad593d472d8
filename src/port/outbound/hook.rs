//! Caller-supplied state hooks.
//!
//! Hooks receive the current working state by value and return the state
//! that subsequent steps continue from.

use async_trait::async_trait;

use crate::domain::{ClosedPosition, Order, StrategyState, Trade};
use crate::error::Result;

/// A filled order and its trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub order: Order,
    pub trade: Trade,
}

/// A reconciled close with the order and trade that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionClose {
    pub position: ClosedPosition,
    pub order: Order,
    pub trade: Trade,
}

/// Invoked when an order fills.
#[async_trait]
pub trait OrderFillHook: Send + Sync {
    async fn on_order_fill(&self, state: StrategyState, fill: &Fill) -> Result<StrategyState>;
}

/// Invoked when a position is closed.
#[async_trait]
pub trait PositionCloseHook: Send + Sync {
    async fn on_position_close(
        &self,
        state: StrategyState,
        close: &PositionClose,
    ) -> Result<StrategyState>;
}
