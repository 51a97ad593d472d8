//! Symbol resolution adapters.

use crate::domain::{StrategyState, Symbol};
use crate::error::{CloseError, Result};
use crate::port::SymbolResolver;

/// Resolves the symbol from the state itself.
///
/// Uses the strategy's configured symbol, falling back to the only open
/// position when exactly one is tracked.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateSymbolResolver;

impl SymbolResolver for StateSymbolResolver {
    fn default_symbol(&self, state: &StrategyState) -> Result<Symbol> {
        if let Some(symbol) = &state.symbol {
            return Ok(symbol.clone());
        }
        let mut open = state.positions.keys();
        match (open.next(), open.next()) {
            (Some(only), None) => Ok(only.clone()),
            _ => Err(CloseError::NoDefaultSymbol.into()),
        }
    }
}

/// Always resolves to one configured symbol.
#[derive(Debug, Clone)]
pub struct FixedSymbolResolver {
    symbol: Symbol,
}

impl FixedSymbolResolver {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl SymbolResolver for FixedSymbolResolver {
    fn default_symbol(&self, _state: &StrategyState) -> Result<Symbol> {
        Ok(self.symbol.clone())
    }
}
