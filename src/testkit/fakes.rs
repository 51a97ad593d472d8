//! Recording and scripted collaborators for closer tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Order, OrderParams, StrategyState, Trade};
use crate::error::{Error, Result, SubmissionError};
use crate::port::{
    EventEmitter, Fill, OrderFillHook, PositionClose, PositionCloseHook, StrategyEvent,
    TradeSubmitter,
};

/// Thread-safe event collector for emission assertions.
#[derive(Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<StrategyEvent>>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StrategyEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event: StrategyEvent) {
        self.events.lock().push(event);
    }
}

type Scripted = std::result::Result<(Order, Trade), SubmissionError>;

/// Submitter that replays scripted results and records the params it saw.
#[derive(Default)]
pub struct ScriptedSubmitter {
    script: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<OrderParams>>,
}

impl ScriptedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful fill.
    #[must_use]
    pub fn fill(self, order: Order, trade: Trade) -> Self {
        self.script.lock().push_back(Ok((order, trade)));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn fail(self, error: SubmissionError) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Params of every submission so far.
    pub fn seen(&self) -> Vec<OrderParams> {
        self.seen.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }
}

#[async_trait]
impl TradeSubmitter for ScriptedSubmitter {
    async fn submit(
        &self,
        _state: &StrategyState,
        params: &OrderParams,
    ) -> std::result::Result<(Order, Trade), SubmissionError> {
        self.seen.lock().push(params.clone());
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| Err(SubmissionError::Venue("script exhausted".into())))
    }

    fn venue_name(&self) -> &'static str {
        "scripted"
    }
}

/// Ordered log of hook invocations shared between hooks.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn push(&self, name: &'static str) {
        self.calls.lock().push(name);
    }
}

type Transform = Arc<dyn Fn(StrategyState) -> StrategyState + Send + Sync>;

/// Hook that logs each call and optionally rewrites the state.
#[derive(Clone)]
pub struct RecordingHook {
    name: &'static str,
    log: CallLog,
    transform: Option<Transform>,
    fail: bool,
    fills: Arc<Mutex<Vec<Fill>>>,
    closes: Arc<Mutex<Vec<PositionClose>>>,
}

impl RecordingHook {
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            transform: None,
            fail: false,
            fills: Arc::default(),
            closes: Arc::default(),
        }
    }

    /// Fill payloads received so far.
    pub fn fills(&self) -> Vec<Fill> {
        self.fills.lock().clone()
    }

    /// Close payloads received so far.
    pub fn closes(&self) -> Vec<PositionClose> {
        self.closes.lock().clone()
    }

    /// Rewrite the working state on each call.
    #[must_use]
    pub fn transforming(
        mut self,
        transform: impl Fn(StrategyState) -> StrategyState + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Fail every call with [`Error::Hook`].
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn run(&self, state: StrategyState) -> Result<StrategyState> {
        self.log.push(self.name);
        if self.fail {
            return Err(Error::Hook(format!("{} failed", self.name)));
        }
        Ok(match &self.transform {
            Some(transform) => transform(state),
            None => state,
        })
    }
}

#[async_trait]
impl OrderFillHook for RecordingHook {
    async fn on_order_fill(&self, state: StrategyState, fill: &Fill) -> Result<StrategyState> {
        self.fills.lock().push(fill.clone());
        self.run(state)
    }
}

#[async_trait]
impl PositionCloseHook for RecordingHook {
    async fn on_position_close(
        &self,
        state: StrategyState,
        close: &PositionClose,
    ) -> Result<StrategyState> {
        self.closes.lock().push(close.clone());
        self.run(state)
    }
}
