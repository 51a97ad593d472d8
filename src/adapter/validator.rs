//! Order parameter validation.

use rust_decimal::Decimal;

use crate::domain::{OrderParams, OrderType, StrategyState};
use crate::error::ValidationError;
use crate::port::OrderValidator;

/// Default maximum number of decimal places in an order amount.
pub const DEFAULT_MAX_AMOUNT_SCALE: u32 = 8;

/// Structural order checks shared by every venue.
#[derive(Debug, Clone, Copy)]
pub struct StandardOrderValidator {
    max_amount_scale: u32,
}

impl StandardOrderValidator {
    #[must_use]
    pub const fn new(max_amount_scale: u32) -> Self {
        Self { max_amount_scale }
    }
}

impl Default for StandardOrderValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AMOUNT_SCALE)
    }
}

impl OrderValidator for StandardOrderValidator {
    fn validate(
        &self,
        _state: &StrategyState,
        params: &OrderParams,
    ) -> Result<(), ValidationError> {
        if params.symbol.is_none() {
            return Err(ValidationError::MissingSymbol);
        }
        if params.amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }
        if params.amount.normalize().scale() > self.max_amount_scale {
            return Err(ValidationError::ExcessPrecision {
                amount: params.amount,
                max_scale: self.max_amount_scale,
            });
        }
        match (params.order_type, params.price) {
            (OrderType::Limit, None) => Err(ValidationError::MissingLimitPrice),
            (_, Some(price)) if price <= Decimal::ZERO => {
                Err(ValidationError::NonPositivePrice { price })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn check(params: OrderParams) -> Result<(), ValidationError> {
        StandardOrderValidator::default().validate(&StrategyState::new(), &params)
    }

    #[test]
    fn accepts_market_and_limit_orders() {
        assert_eq!(check(OrderParams::market(dec!(-2)).with_symbol("tBTCUSD")), Ok(()));
        assert_eq!(
            check(OrderParams::limit(dec!(1.5), dec!(99)).with_symbol("tBTCUSD")),
            Ok(())
        );
    }

    #[test]
    fn rejects_missing_symbol() {
        assert_eq!(
            check(OrderParams::market(dec!(1))),
            Err(ValidationError::MissingSymbol)
        );
    }

    #[test]
    fn rejects_zero_amount() {
        assert_eq!(
            check(OrderParams::market(dec!(0)).with_symbol("tBTCUSD")),
            Err(ValidationError::ZeroAmount)
        );
    }

    #[test]
    fn rejects_limit_without_price() {
        let mut params = OrderParams::market(dec!(1)).with_symbol("tBTCUSD");
        params.order_type = OrderType::Limit;
        assert_eq!(check(params), Err(ValidationError::MissingLimitPrice));
    }

    #[test]
    fn rejects_non_positive_price() {
        assert_eq!(
            check(OrderParams::limit(dec!(1), dec!(0)).with_symbol("tBTCUSD")),
            Err(ValidationError::NonPositivePrice { price: dec!(0) })
        );
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        assert_eq!(
            check(OrderParams::market(dec!(1.0000000000)).with_symbol("tBTCUSD")),
            Ok(())
        );
        assert!(matches!(
            check(OrderParams::market(dec!(0.123456789)).with_symbol("tBTCUSD")),
            Err(ValidationError::ExcessPrecision { max_scale: 8, .. })
        ));
    }
}
