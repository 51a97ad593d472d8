//! Close transition and simulator configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::validator::DEFAULT_MAX_AMOUNT_SCALE;

/// Close transition configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CloserConfig {
    /// Symbol used when an order names none.
    #[serde(default)]
    pub default_symbol: Option<String>,
    /// Replay mode: skips fill hooks and close logging.
    #[serde(default)]
    pub backtesting: bool,
    /// Maximum decimal places accepted in an order amount.
    #[serde(default = "default_max_amount_scale")]
    pub max_amount_scale: u32,
    /// Reject overlapping closes on one symbol.
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
}

const fn default_max_amount_scale() -> u32 {
    DEFAULT_MAX_AMOUNT_SCALE
}

const fn default_single_flight() -> bool {
    true
}

impl Default for CloserConfig {
    fn default() -> Self {
        Self {
            default_symbol: None,
            backtesting: false,
            max_amount_scale: default_max_amount_scale(),
            single_flight: default_single_flight(),
        }
    }
}

/// Simulated venue configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Fee as a fraction of notional (e.g., 0.002 = 0.2%).
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,
    /// Artificial fill latency in milliseconds (default: 0).
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_fee_rate() -> Decimal {
    Decimal::new(2, 3) // 0.2%
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fee_rate: default_fee_rate(),
            latency_ms: 0,
        }
    }
}
