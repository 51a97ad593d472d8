//! Composition root: wires configured adapters into a closer.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::simulator::SimulatedSubmitter;
use crate::adapter::symbol::{FixedSymbolResolver, StateSymbolResolver};
use crate::adapter::validator::StandardOrderValidator;
use crate::application::close::PositionCloser;
use crate::application::guard::GuardedCloser;
use crate::domain::{OrderParams, StrategyState};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{SymbolResolver, TradeSubmitter};

/// Either a bare closer or one guarded against overlapping closes.
pub enum Closer {
    Plain(PositionCloser),
    Guarded(GuardedCloser),
}

impl Closer {
    /// Close via whichever variant is configured.
    ///
    /// # Errors
    ///
    /// See [`PositionCloser::close`] and [`GuardedCloser::close`].
    pub async fn close(
        &self,
        state: &StrategyState,
        params: OrderParams,
    ) -> Result<StrategyState> {
        match self {
            Self::Plain(closer) => closer.close(state, params).await,
            Self::Guarded(closer) => closer.close(state, params).await,
        }
    }
}

/// Build the simulated venue from `[simulator]`.
#[must_use]
pub fn build_simulator(config: &Config) -> Arc<SimulatedSubmitter> {
    let mut simulator = SimulatedSubmitter::new(config.simulator.fee_rate);
    if config.simulator.latency_ms > 0 {
        simulator = simulator.with_latency(Duration::from_millis(config.simulator.latency_ms));
    }
    Arc::new(simulator)
}

/// Build a closer around `submitter` from `[closer]`.
#[must_use]
pub fn build_closer(config: &Config, submitter: Arc<dyn TradeSubmitter>) -> Closer {
    let resolver: Arc<dyn SymbolResolver> = match &config.closer.default_symbol {
        Some(symbol) => Arc::new(FixedSymbolResolver::new(symbol.as_str())),
        None => Arc::new(StateSymbolResolver),
    };
    let closer = PositionCloser::builder(submitter)
        .resolver(resolver)
        .validator(Arc::new(StandardOrderValidator::new(
            config.closer.max_amount_scale,
        )))
        .build();

    info!(
        backtesting = config.closer.backtesting,
        single_flight = config.closer.single_flight,
        "Closer initialized"
    );

    if config.closer.single_flight {
        Closer::Guarded(GuardedCloser::new(closer))
    } else {
        Closer::Plain(closer)
    }
}

/// Empty starting state carrying the configured symbol and mode.
#[must_use]
pub fn initial_state(config: &Config) -> StrategyState {
    let state = StrategyState::new().with_backtesting(config.closer.backtesting);
    match &config.closer.default_symbol {
        Some(symbol) => state.with_symbol(symbol.as_str()),
        None => state,
    }
}
