//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement state transitions.

pub mod close;
pub mod guard;

pub use close::{PositionCloser, PositionCloserBuilder};
pub use guard::{GuardedCloser, SymbolGuard, SymbolLease};
