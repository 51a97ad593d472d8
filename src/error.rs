use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::Symbol;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Reasons a close-position transition refuses to run or complete.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CloseError {
    #[error("no position is currently open for {symbol}")]
    NoOpenPosition { symbol: Symbol },

    #[error("order would not close position (pos for {open})")]
    AmountMismatch {
        symbol: Symbol,
        open: Decimal,
        requested: Decimal,
    },

    #[error("no default symbol configured")]
    NoDefaultSymbol,

    #[error("a close is already in flight for {symbol}")]
    CloseInFlight { symbol: Symbol },

    #[error("hook returned malformed state: {reason}")]
    MalformedState { reason: String },
}

/// Order parameter validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("order amount must be non-zero")]
    ZeroAmount,

    #[error("order symbol is required")]
    MissingSymbol,

    #[error("limit order requires a price")]
    MissingLimitPrice,

    #[error("order price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

    #[error("order amount {amount} exceeds {max_scale} decimal places")]
    ExcessPrecision { amount: Decimal, max_scale: u32 },
}

/// Trade submission errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("no price available for {symbol}")]
    NoPrice { symbol: Symbol },

    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("venue error: {0}")]
    Venue(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Close(#[from] CloseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("hook failed: {0}")]
    Hook(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The close-transition error, if this is one.
    #[must_use]
    pub const fn as_close(&self) -> Option<&CloseError> {
        match self {
            Self::Close(e) => Some(e),
            _ => None,
        }
    }
}
