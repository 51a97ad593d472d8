//! Per-symbol single-flight guard for close calls.

use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::warn;

use super::close::PositionCloser;
use crate::domain::{OrderParams, StrategyState, Symbol};
use crate::error::{CloseError, Result};

/// Symbols with an in-flight close.
#[derive(Debug, Default)]
pub struct SymbolGuard {
    in_flight: Mutex<HashSet<Symbol>>,
}

impl SymbolGuard {
    /// Create an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire the close lock for a symbol.
    /// Returns `None` if a close for it is already running.
    pub fn try_acquire(&self, symbol: &Symbol) -> Option<SymbolLease<'_>> {
        if self.in_flight.lock().insert(symbol.clone()) {
            Some(SymbolLease {
                guard: self,
                symbol: symbol.clone(),
            })
        } else {
            None
        }
    }

    /// Check whether a close for `symbol` is running.
    pub fn is_in_flight(&self, symbol: &Symbol) -> bool {
        self.in_flight.lock().contains(symbol)
    }

    /// Count symbols with in-flight closes.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// Held while a close runs; releases the symbol on drop.
#[derive(Debug)]
pub struct SymbolLease<'a> {
    guard: &'a SymbolGuard,
    symbol: Symbol,
}

impl SymbolLease<'_> {
    /// The leased symbol.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

impl Drop for SymbolLease<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.lock().remove(&self.symbol);
    }
}

/// A [`PositionCloser`] that refuses overlapping closes on one symbol.
pub struct GuardedCloser {
    closer: PositionCloser,
    guard: SymbolGuard,
}

impl GuardedCloser {
    #[must_use]
    pub fn new(closer: PositionCloser) -> Self {
        Self {
            closer,
            guard: SymbolGuard::new(),
        }
    }

    /// The in-flight tracker.
    #[must_use]
    pub fn guard(&self) -> &SymbolGuard {
        &self.guard
    }

    /// Close as [`PositionCloser::close`] does, holding the symbol lease
    /// for the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`CloseError::CloseInFlight`] when another close for the same
    /// symbol has not finished, plus every error of the wrapped closer.
    pub async fn close(
        &self,
        state: &StrategyState,
        params: OrderParams,
    ) -> Result<StrategyState> {
        let symbol = self.closer.resolve_symbol(state, &params)?;
        let Some(_lease) = self.guard.try_acquire(&symbol) else {
            warn!(symbol = %symbol, "Close already in flight, rejecting");
            return Err(CloseError::CloseInFlight { symbol }.into());
        };
        self.closer.close(state, params).await
    }
}
