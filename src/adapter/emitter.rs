//! Event emitter adapters.
//!
//! Implements the `port::EventEmitter` trait for logging, channels and
//! fan-out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::port::{EventEmitter, StrategyEvent};

/// Registry of emitters (composite pattern).
///
/// Broadcasts events to all registered emitters.
#[derive(Default)]
pub struct EmitterRegistry {
    emitters: Vec<Arc<dyn EventEmitter>>,
}

impl EmitterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { emitters: vec![] }
    }

    /// Register an emitter.
    pub fn register(&mut self, emitter: Arc<dyn EventEmitter>) {
        self.emitters.push(emitter);
    }

    /// Number of registered emitters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }
}

impl EventEmitter for EmitterRegistry {
    fn emit(&self, event: StrategyEvent) {
        for emitter in &self.emitters {
            emitter.emit(event.clone());
        }
    }
}

/// A no-op emitter for when events are disabled.
pub struct NullEmitter;

impl EventEmitter for NullEmitter {
    fn emit(&self, _event: StrategyEvent) {}
}

/// Logs events via tracing.
pub struct LogEmitter;

impl EventEmitter for LogEmitter {
    fn emit(&self, event: StrategyEvent) {
        match &event {
            StrategyEvent::ClosedPositionData(e) => {
                info!(
                    event = event.name(),
                    symbol = %e.position.symbol(),
                    closing_price = %e.position.closing_price,
                    realized_pnl = %e.realized_pnl,
                    "Closed position data"
                );
            }
        }
    }
}

/// Forwards events over an unbounded channel to an async consumer.
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<StrategyEvent>,
}

impl ChannelEmitter {
    /// Create an emitter and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StrategyEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventEmitter for ChannelEmitter {
    fn emit(&self, event: StrategyEvent) {
        if self.tx.send(event).is_err() {
            trace!("Event receiver dropped");
        }
    }
}
