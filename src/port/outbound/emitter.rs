//! Event emitter port for strategy events.
//!
//! This module defines the events a strategy run publishes and the trait
//! for receiving them.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::position::ClosedPosition;

/// Events published by state transitions.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum StrategyEvent {
    /// A position was closed and reconciled.
    ClosedPositionData(ClosedPositionEvent),
}

impl StrategyEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClosedPositionData(_) => "closed_position_data",
        }
    }
}

/// Payload of `closed_position_data`.
///
/// Serializes as the closed position's fields plus the two PnL figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedPositionEvent {
    /// The closed position record.
    #[serde(flatten)]
    pub position: ClosedPosition,
    /// Realized profit or loss of the whole position.
    pub realized_pnl: Decimal,
    /// Always zero for a closed position.
    pub unrealized_pnl: Decimal,
}

impl ClosedPositionEvent {
    /// Create the payload for a closed position.
    #[must_use]
    pub fn new(position: ClosedPosition, realized_pnl: Decimal) -> Self {
        Self {
            position,
            realized_pnl,
            unrealized_pnl: Decimal::ZERO,
        }
    }
}

/// Trait for event sinks.
///
/// Emission is fire-and-forget: implementations must return quickly and
/// must not fail the transition that emitted.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - For slow operations, spawn a task or forward over a channel
pub trait EventEmitter: Send + Sync {
    /// Handle an event.
    fn emit(&self, event: StrategyEvent);
}
