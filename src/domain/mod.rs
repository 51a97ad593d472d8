//! Venue-agnostic domain types.

pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod position;
pub mod state;
pub mod trade;

pub use error::DomainError;
pub use id::{OrderId, Symbol, TradeId};
pub use money::{Amount, Price};
pub use order::{Order, OrderMeta, OrderParams, OrderType};
pub use position::{ClosedPosition, Position};
pub use state::{Positions, StrategyHooks, StrategyState};
pub use trade::Trade;
