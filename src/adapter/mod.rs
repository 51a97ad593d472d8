//! Implementations of ports (hexagonal adapters).

pub mod emitter;
pub mod position;
pub mod simulator;
pub mod symbol;
pub mod validator;

pub use emitter::{ChannelEmitter, EmitterRegistry, LogEmitter, NullEmitter};
pub use position::{TradeSumPnlCalculator, WeightedAveragePositionUpdater};
pub use simulator::SimulatedSubmitter;
pub use symbol::{FixedSymbolResolver, StateSymbolResolver};
pub use validator::StandardOrderValidator;
