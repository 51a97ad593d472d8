//! Trading ports: symbol resolution, validation and submission.
//!
//! These traits are the integration points between the close transition
//! and a venue or simulator.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{ClosedPosition, Order, OrderParams, Position, StrategyState, Symbol, Trade};
use crate::error::{self, SubmissionError, ValidationError};

/// Picks the trading symbol when an order names none.
pub trait SymbolResolver: Send + Sync {
    /// Default symbol for `state`.
    ///
    /// # Errors
    ///
    /// Fails when no default can be determined.
    fn default_symbol(&self, state: &StrategyState) -> error::Result<Symbol>;
}

/// Checks order parameters before submission.
pub trait OrderValidator: Send + Sync {
    /// Validate `params` against `state`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the order breaks.
    fn validate(&self, state: &StrategyState, params: &OrderParams)
        -> Result<(), ValidationError>;
}

/// Sends orders to a venue or simulator.
#[async_trait]
pub trait TradeSubmitter: Send + Sync {
    /// Submit `params` and wait for the fill.
    ///
    /// # Errors
    ///
    /// Fails on any venue or submission error. Implementations own their
    /// timeouts; callers do not retry.
    async fn submit(
        &self,
        state: &StrategyState,
        params: &OrderParams,
    ) -> Result<(Order, Trade), SubmissionError>;

    /// Venue name for logging.
    fn venue_name(&self) -> &'static str;
}

/// Folds a fill into a position snapshot.
pub trait PositionUpdater: Send + Sync {
    fn apply(&self, position: Position, trade: &Trade) -> Position;
}

/// Computes realized profit or loss of a closed position.
pub trait PnlCalculator: Send + Sync {
    fn realized(&self, position: &ClosedPosition) -> Decimal;
}
