//! Simulated venue for backtests and paper trading.
//!
//! Fills every order completely: market orders at the last price set for
//! the symbol, limit orders at their limit price.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::debug;

use super::position::realized_against;
use crate::domain::{Order, OrderId, OrderParams, OrderType, Price, StrategyState, Symbol, Trade, TradeId};
use crate::error::SubmissionError;
use crate::port::TradeSubmitter;

/// In-process order simulator.
#[derive(Debug, Default)]
pub struct SimulatedSubmitter {
    /// Fee charged as a fraction of notional (e.g., 0.002 = 0.2%).
    fee_rate: Decimal,
    /// Delay before each fill is returned.
    latency: Option<Duration>,
    /// Last known price per symbol.
    prices: RwLock<HashMap<Symbol, Price>>,
    /// Reason to reject the next submission with, if armed.
    reject_next: Mutex<Option<String>>,
    /// Number of orders filled.
    submitted: AtomicU64,
}

impl SimulatedSubmitter {
    /// Create a simulator charging `fee_rate` of notional per fill.
    #[must_use]
    pub fn new(fee_rate: Decimal) -> Self {
        Self {
            fee_rate,
            ..Self::default()
        }
    }

    /// Delay every fill by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Set the last price for a symbol.
    pub fn set_price(&self, symbol: impl Into<Symbol>, price: Price) {
        self.prices.write().insert(symbol.into(), price);
    }

    /// Get the last price for a symbol.
    pub fn price(&self, symbol: &Symbol) -> Option<Price> {
        self.prices.read().get(symbol).copied()
    }

    /// Reject the next submission with `reason`.
    pub fn reject_next(&self, reason: impl Into<String>) {
        *self.reject_next.lock() = Some(reason.into());
    }

    /// Number of orders filled so far.
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    fn fill_price(&self, symbol: &Symbol, params: &OrderParams) -> Result<Price, SubmissionError> {
        match params.order_type {
            OrderType::Limit => params
                .price
                .ok_or_else(|| SubmissionError::Rejected("limit order without price".into())),
            OrderType::Market => self.price(symbol).ok_or_else(|| SubmissionError::NoPrice {
                symbol: symbol.clone(),
            }),
        }
    }
}

#[async_trait]
impl TradeSubmitter for SimulatedSubmitter {
    async fn submit(
        &self,
        state: &StrategyState,
        params: &OrderParams,
    ) -> Result<(Order, Trade), SubmissionError> {
        let symbol = params
            .symbol
            .clone()
            .ok_or_else(|| SubmissionError::Rejected("order has no symbol".into()))?;

        let rejection = self.reject_next.lock().take();
        if let Some(reason) = rejection {
            return Err(SubmissionError::Rejected(reason));
        }

        let price = self.fill_price(&symbol, params)?;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let overflow = || SubmissionError::Rejected("fill value overflows".into());
        let fee = params
            .amount
            .abs()
            .checked_mul(price)
            .and_then(|notional| notional.checked_mul(self.fee_rate))
            .ok_or_else(overflow)?;
        let realized_pnl = realized_against(state.position(&symbol), params.amount, price)
            .and_then(|gross| gross.checked_sub(fee))
            .ok_or_else(overflow)?;
        let now = Utc::now();

        let order = Order {
            id: OrderId::random(),
            symbol: symbol.clone(),
            amount: params.amount,
            price_avg: price,
            order_type: params.order_type,
            created_at: now,
            meta: params.meta.clone(),
        };
        let trade = Trade {
            id: TradeId::random(),
            order_id: order.id.clone(),
            symbol,
            amount: params.amount,
            price,
            fee,
            realized_pnl,
            executed_at: now,
        };

        self.submitted.fetch_add(1, Ordering::SeqCst);
        debug!(
            order_id = %order.id,
            symbol = %order.symbol,
            amount = %order.amount,
            price = %price,
            fee = %fee,
            "Simulated fill"
        );

        Ok((order, trade))
    }

    fn venue_name(&self) -> &'static str {
        "simulator"
    }
}
