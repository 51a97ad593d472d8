//! Trait definitions (hexagonal ports).
//!
//! Ports define the extension points of the closer. They are traits that
//! adapters implement to integrate with venues, simulators and
//! caller-supplied bookkeeping.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  PositionCloser         ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │Submitter │           │  Validator  │              │  Emitter  │
//! │ Adapter  │           │   Adapter   │              │  Adapter  │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`SymbolResolver`], [`OrderValidator`], [`TradeSubmitter`] - Trading
//! - [`PositionUpdater`], [`PnlCalculator`] - Position arithmetic
//! - [`EventEmitter`] - Strategy events
//! - [`OrderFillHook`], [`PositionCloseHook`] - Caller state hooks

pub mod outbound;

pub use outbound::{
    ClosedPositionEvent, EventEmitter, Fill, OrderFillHook, OrderValidator, PnlCalculator,
    PositionClose, PositionCloseHook, PositionUpdater, StrategyEvent, SymbolResolver,
    TradeSubmitter,
};
