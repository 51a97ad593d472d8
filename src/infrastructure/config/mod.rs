//! Infrastructure configuration modules.

pub mod closer;
pub mod logging;
pub mod settings;

pub use closer::{CloserConfig, SimulatorConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use settings::Config;
