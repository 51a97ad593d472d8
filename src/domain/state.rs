//! Immutable strategy state snapshot.
//!
//! Every transition takes a `&StrategyState` and returns a new value.
//! Containers are never mutated in place on a borrowed state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::id::Symbol;
use super::position::{ClosedPosition, Position};
use super::trade::Trade;
use crate::port::{EventEmitter, OrderFillHook, PositionCloseHook};

/// Open positions keyed by symbol.
pub type Positions = BTreeMap<Symbol, Position>;

/// Optional caller-supplied capabilities attached to a state.
#[derive(Clone, Default)]
pub struct StrategyHooks {
    /// Invoked with each fill outside backtesting.
    pub on_order_fill: Option<Arc<dyn OrderFillHook>>,
    /// Invoked with each closed position.
    pub on_position_close: Option<Arc<dyn PositionCloseHook>>,
    /// Receives strategy events.
    pub emit: Option<Arc<dyn EventEmitter>>,
}

impl fmt::Debug for StrategyHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyHooks")
            .field("on_order_fill", &self.on_order_fill.is_some())
            .field("on_position_close", &self.on_position_close.is_some())
            .field("emit", &self.emit.is_some())
            .finish()
    }
}

/// Per-run strategy snapshot.
#[derive(Debug, Clone, Default)]
pub struct StrategyState {
    /// Strategy default symbol.
    pub symbol: Option<Symbol>,
    /// At most one open position per symbol.
    pub positions: Positions,
    /// Closed position history, append-only.
    pub closed_positions: Vec<ClosedPosition>,
    /// Trade history, append-only.
    pub trades: Vec<Trade>,
    /// True when replaying historical data.
    pub backtesting: bool,
    /// Optional hooks and event sink.
    pub hooks: StrategyHooks,
}

impl StrategyState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Track an open position, replacing any previous one for the symbol.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.insert(position.symbol.clone(), position);
        self
    }

    /// Set the backtesting flag.
    #[must_use]
    pub fn with_backtesting(mut self, backtesting: bool) -> Self {
        self.backtesting = backtesting;
        self
    }

    /// Attach a fill hook.
    #[must_use]
    pub fn with_order_fill_hook(mut self, hook: Arc<dyn OrderFillHook>) -> Self {
        self.hooks.on_order_fill = Some(hook);
        self
    }

    /// Attach a position-close hook.
    #[must_use]
    pub fn with_position_close_hook(mut self, hook: Arc<dyn PositionCloseHook>) -> Self {
        self.hooks.on_position_close = Some(hook);
        self
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.hooks.emit = Some(emitter);
        self
    }

    /// Open position for `symbol`, if one is tracked.
    #[must_use]
    pub fn position(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Open position for `symbol` only if the record is well-formed.
    #[must_use]
    pub fn open_position(&self, symbol: &Symbol) -> Option<&Position> {
        self.position(symbol).filter(|p| p.is_well_formed(symbol))
    }

    /// Build the state that follows a reconciled close.
    ///
    /// `base_positions` is the position map with the closed symbol already
    /// removed; the histories of `self` each gain one entry.
    #[must_use]
    pub fn after_close(
        self,
        base_positions: Positions,
        closed: ClosedPosition,
        trade: Trade,
    ) -> Self {
        let mut closed_positions = self.closed_positions;
        closed_positions.push(closed);
        let mut trades = self.trades;
        trades.push(trade);

        Self {
            positions: base_positions,
            closed_positions,
            trades,
            ..self
        }
    }
}
