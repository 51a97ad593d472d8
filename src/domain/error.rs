//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use closeout::domain::error::DomainError;
//! use closeout::domain::id::Symbol;
//! use closeout::domain::position::Position;
//! use rust_decimal_macros::dec;
//!
//! let result = Position::try_new(Symbol::new("tBTCUSD"), dec!(0), dec!(100));
//! assert!(matches!(result, Err(DomainError::ZeroAmount { .. })));
//! ```

use thiserror::Error;

use super::id::Symbol;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Open positions must carry a non-zero amount.
    #[error("position amount for {symbol} must be non-zero")]
    ZeroAmount {
        /// The symbol of the rejected position.
        symbol: Symbol,
    },

    /// Base price of a position must not be negative.
    #[error("base price must not be negative, got {price}")]
    NegativePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },
}
