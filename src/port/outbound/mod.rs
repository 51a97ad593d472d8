//! Outbound ports: collaborators the close transition calls out to.

pub mod emitter;
pub mod exchange;
pub mod hook;

pub use emitter::{ClosedPositionEvent, EventEmitter, StrategyEvent};
pub use exchange::{OrderValidator, PnlCalculator, PositionUpdater, SymbolResolver, TradeSubmitter};
pub use hook::{Fill, OrderFillHook, PositionClose, PositionCloseHook};
