//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for positions, trades, orders and states.
//! - [`fakes`] - Recording emitters and hooks, scripted submitters.
//! - [`logging`] - Captures `tracing` messages for log assertions.

pub mod domain;
pub mod fakes;
pub mod logging;
