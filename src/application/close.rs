//! Close-position transition.
//!
//! Reconciles an open position against a freshly submitted, opposite-side
//! order and returns the next strategy state. The sequence is fixed:
//! preconditions, submission, reconciliation, hooks, emission, next state.
//! Any failure before the final step leaves the caller's state as it was.
//!
//! The transition takes no locks. Callers must serialize closes per
//! symbol, or wrap the closer in a
//! [`GuardedCloser`](super::guard::GuardedCloser).

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::adapter::position::{TradeSumPnlCalculator, WeightedAveragePositionUpdater};
use crate::adapter::symbol::StateSymbolResolver;
use crate::adapter::validator::StandardOrderValidator;
use crate::domain::{OrderParams, StrategyState, Symbol};
use crate::error::{CloseError, Result};
use crate::port::{
    ClosedPositionEvent, Fill, OrderValidator, PnlCalculator, PositionClose, PositionUpdater,
    StrategyEvent, SymbolResolver, TradeSubmitter,
};

/// Closes open positions with exactly-negating orders.
#[derive(Clone)]
pub struct PositionCloser {
    resolver: Arc<dyn SymbolResolver>,
    validator: Arc<dyn OrderValidator>,
    submitter: Arc<dyn TradeSubmitter>,
    updater: Arc<dyn PositionUpdater>,
    pnl: Arc<dyn PnlCalculator>,
}

impl PositionCloser {
    /// Create a closer with the reference collaborators around `submitter`.
    #[must_use]
    pub fn new(submitter: Arc<dyn TradeSubmitter>) -> Self {
        Self::builder(submitter).build()
    }

    /// Create a builder that submits through `submitter`.
    #[must_use]
    pub fn builder(submitter: Arc<dyn TradeSubmitter>) -> PositionCloserBuilder {
        PositionCloserBuilder::new(submitter)
    }

    /// Resolve the symbol an order targets.
    pub(crate) fn resolve_symbol(
        &self,
        state: &StrategyState,
        params: &OrderParams,
    ) -> Result<Symbol> {
        match &params.symbol {
            Some(symbol) => Ok(symbol.clone()),
            None => self.resolver.default_symbol(state),
        }
    }

    /// Close the open position targeted by `params`.
    ///
    /// # Errors
    ///
    /// - [`CloseError::NoOpenPosition`] if no well-formed position is open
    ///   for the symbol
    /// - [`CloseError::AmountMismatch`] if the order does not net the
    ///   position to exactly zero
    /// - the validator's or submitter's error, unchanged
    /// - any hook error, and [`CloseError::MalformedState`] if a hook
    ///   adds or drops entries in the trade or closed-position history
    pub async fn close(
        &self,
        state: &StrategyState,
        mut params: OrderParams,
    ) -> Result<StrategyState> {
        let symbol = self.resolve_symbol(state, &params)?;
        params.symbol.get_or_insert_with(|| symbol.clone());

        let prev = state
            .open_position(&symbol)
            .ok_or_else(|| CloseError::NoOpenPosition {
                symbol: symbol.clone(),
            })?;

        let nets_to_zero = prev
            .amount
            .checked_add(params.amount)
            .is_some_and(|net| net.is_zero());
        if !nets_to_zero {
            return Err(CloseError::AmountMismatch {
                symbol,
                open: prev.amount,
                requested: params.amount,
            }
            .into());
        }

        self.validator.validate(state, &params)?;

        debug!(
            symbol = %symbol,
            amount = %params.amount,
            venue = self.submitter.venue_name(),
            "Submitting closing order"
        );
        let (order, trade) = self.submitter.submit(state, &params).await?;

        let position = self
            .updater
            .apply(prev.clone(), &trade)
            .into_closed(trade.price, Utc::now());

        let hooks = &state.hooks;
        let mut working = state.clone();

        if !state.backtesting {
            if let Some(hook) = &hooks.on_order_fill {
                let fill = Fill {
                    order: order.clone(),
                    trade: trade.clone(),
                };
                working = hook.on_order_fill(working, &fill).await?;
                ensure_history_kept(state, &working, "on_order_fill")?;
                debug!(symbol = %symbol, "Order fill hook applied");
            }
        }

        if let Some(hook) = &hooks.on_position_close {
            let close = PositionClose {
                position: position.clone(),
                order: order.clone(),
                trade: trade.clone(),
            };
            working = hook.on_position_close(working, &close).await?;
            ensure_history_kept(state, &working, "on_position_close")?;
            debug!(symbol = %symbol, "Position close hook applied");
        }

        if !state.backtesting {
            info!(
                symbol = %symbol,
                price_avg = %order.price_avg,
                order_type = %order.order_type,
                realized_pnl = %trade.realized_pnl,
                "Position closed"
            );
        }

        if let Some(emitter) = &hooks.emit {
            let realized_pnl = self.pnl.realized(&position);
            emitter.emit(StrategyEvent::ClosedPositionData(ClosedPositionEvent::new(
                position.clone(),
                realized_pnl,
            )));
        }

        let mut positions = state.positions.clone();
        positions.remove(&symbol);

        Ok(working.after_close(positions, position, trade))
    }
}

/// Hooks may rewrite the working state but not its histories' lengths.
fn ensure_history_kept(
    before: &StrategyState,
    after: &StrategyState,
    hook: &'static str,
) -> Result<()> {
    if after.trades.len() != before.trades.len() {
        return Err(CloseError::MalformedState {
            reason: format!(
                "{hook} changed trade count ({} -> {})",
                before.trades.len(),
                after.trades.len()
            ),
        }
        .into());
    }
    if after.closed_positions.len() != before.closed_positions.len() {
        return Err(CloseError::MalformedState {
            reason: format!(
                "{hook} changed closed position count ({} -> {})",
                before.closed_positions.len(),
                after.closed_positions.len()
            ),
        }
        .into());
    }
    Ok(())
}

/// Builder for [`PositionCloser`].
///
/// # Example
///
/// ```ignore
/// let closer = PositionCloser::builder(submitter)
///     .resolver(Arc::new(FixedSymbolResolver::new("tBTCUSD")))
///     .validator(Arc::new(StandardOrderValidator::new(8)))
///     .build();
/// ```
pub struct PositionCloserBuilder {
    resolver: Option<Arc<dyn SymbolResolver>>,
    validator: Option<Arc<dyn OrderValidator>>,
    submitter: Arc<dyn TradeSubmitter>,
    updater: Option<Arc<dyn PositionUpdater>>,
    pnl: Option<Arc<dyn PnlCalculator>>,
}

impl PositionCloserBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(submitter: Arc<dyn TradeSubmitter>) -> Self {
        Self {
            resolver: None,
            validator: None,
            submitter,
            updater: None,
            pnl: None,
        }
    }

    /// Set the symbol resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn SymbolResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the order validator.
    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn OrderValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Set the position updater.
    #[must_use]
    pub fn updater(mut self, updater: Arc<dyn PositionUpdater>) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Set the PnL calculator.
    #[must_use]
    pub fn pnl(mut self, pnl: Arc<dyn PnlCalculator>) -> Self {
        self.pnl = Some(pnl);
        self
    }

    /// Build the closer, filling unset collaborators with the reference ones.
    #[must_use]
    pub fn build(self) -> PositionCloser {
        PositionCloser {
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(StateSymbolResolver)),
            validator: self
                .validator
                .unwrap_or_else(|| Arc::new(StandardOrderValidator::default())),
            submitter: self.submitter,
            updater: self
                .updater
                .unwrap_or_else(|| Arc::new(WeightedAveragePositionUpdater)),
            pnl: self.pnl.unwrap_or_else(|| Arc::new(TradeSumPnlCalculator)),
        }
    }
}
