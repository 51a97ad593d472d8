//! Closeout - position close-out transition for async strategy runtimes.
//!
//! This crate reconciles an open position against a freshly submitted,
//! opposite-side order and produces the next immutable strategy state.
//!
//! # Architecture
//!
//! The crate is split into hexagonal layers:
//!
//! - **`domain`** - Positions, orders, trades and the strategy state snapshot
//! - **`port`** - Collaborator traits: symbol resolution, validation,
//!   submission, position arithmetic, PnL, events and hooks
//! - **`application`** - The [`PositionCloser`](application::PositionCloser)
//!   transition and the per-symbol [`GuardedCloser`](application::GuardedCloser)
//! - **`adapter`** - Reference collaborators, including a simulated venue
//! - **`infrastructure`** - TOML configuration, logging and wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use closeout::adapter::SimulatedSubmitter;
//! use closeout::application::PositionCloser;
//! use closeout::domain::{OrderParams, Position, StrategyState, Symbol};
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> closeout::error::Result<()> {
//! let venue = Arc::new(SimulatedSubmitter::default());
//! venue.set_price("tBTCUSD", dec!(100));
//! let closer = PositionCloser::new(venue);
//!
//! let state = StrategyState::new()
//!     .with_position(Position::try_new(Symbol::new("tBTCUSD"), dec!(2), dec!(75))?);
//! let next = closer
//!     .close(&state, OrderParams::market(dec!(-2)).with_symbol("tBTCUSD"))
//!     .await?;
//! assert!(next.positions.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
