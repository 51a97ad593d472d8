//! Configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use closeout::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("closeout.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::closer::{CloserConfig, SimulatorConfig};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Main configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Close transition settings.
    #[serde(default)]
    pub closer: CloserConfig,

    /// Simulated venue settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if let Some(symbol) = &self.closer.default_symbol {
            if symbol.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "default_symbol",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }
        if self.closer.max_amount_scale > 28 {
            return Err(ConfigError::InvalidValue {
                field: "max_amount_scale",
                reason: "must be at most 28".to_string(),
            }
            .into());
        }
        if self.simulator.fee_rate < Decimal::ZERO || self.simulator.fee_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "fee_rate",
                reason: "must be at least 0 and below 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
