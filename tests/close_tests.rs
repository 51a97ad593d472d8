//! Integration tests for the close-position transition.

use std::sync::Arc;

use chrono::Utc;
use closeout::application::PositionCloser;
use closeout::domain::{OrderParams, StrategyState, Symbol};
use closeout::error::{CloseError, Error, SubmissionError, ValidationError};
use closeout::port::StrategyEvent;
use closeout::testkit::domain::{order_for, position, state_with, symbol, trade};
use closeout::testkit::fakes::{CallLog, RecordingEmitter, RecordingHook, ScriptedSubmitter};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn btc_long() -> StrategyState {
    state_with([position("BTC", dec!(2), dec!(75))])
}

fn closing_fill(realized: Decimal) -> ScriptedSubmitter {
    let fill = trade("BTC", dec!(-2), dec!(100), realized);
    ScriptedSubmitter::new().fill(order_for(&fill), fill)
}

fn close_btc() -> OrderParams {
    OrderParams::market(dec!(-2)).with_symbol("BTC")
}

#[tokio::test]
async fn full_close_removes_position_and_records_history() {
    let submitter = Arc::new(closing_fill(dec!(50)));
    let closer = PositionCloser::new(submitter.clone());
    let state = btc_long();
    let started = Utc::now();

    let next = closer.close(&state, close_btc()).await.unwrap();

    assert!(next.positions.is_empty());
    assert_eq!(next.closed_positions.len(), 1);
    assert_eq!(next.trades.len(), 1);

    let closed = &next.closed_positions[0];
    assert_eq!(closed.closing_price, dec!(100));
    assert!(closed.closed_at >= started);
    assert_eq!(closed.symbol(), &symbol("BTC"));
    assert!(closed.position.amount.is_zero());
    assert_eq!(closed.trades().len(), 1);

    assert_eq!(next.trades[0].price, dec!(100));
    assert_eq!(next.trades[0].realized_pnl, dec!(50));
    assert_eq!(submitter.calls(), 1);
}

#[tokio::test]
async fn appended_trade_is_the_submitted_one() {
    let fill = trade("BTC", dec!(-2), dec!(100), dec!(50));
    let submitter = Arc::new(ScriptedSubmitter::new().fill(order_for(&fill), fill.clone()));

    let next = PositionCloser::new(submitter)
        .close(&btc_long(), close_btc())
        .await
        .unwrap();

    assert_eq!(next.trades.last(), Some(&fill));
}

#[tokio::test]
async fn short_position_closes_with_buy() {
    let fill = trade("BTC", dec!(3), dec!(90), dec!(30));
    let submitter = Arc::new(ScriptedSubmitter::new().fill(order_for(&fill), fill));
    let state = state_with([position("BTC", dec!(-3), dec!(100))]);

    let next = PositionCloser::new(submitter)
        .close(&state, OrderParams::market(dec!(3)).with_symbol("BTC"))
        .await
        .unwrap();

    assert!(next.positions.is_empty());
    assert_eq!(next.closed_positions[0].closing_price, dec!(90));
}

#[tokio::test]
async fn other_symbols_are_untouched() {
    let eth = position("ETH", dec!(-5), dec!(3000));
    let state = state_with([position("BTC", dec!(2), dec!(75)), eth.clone()]);

    let next = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    assert_eq!(next.positions.len(), 1);
    assert_eq!(next.positions.get(&symbol("ETH")), Some(&eth));
    assert!(!next.positions.contains_key(&symbol("BTC")));
}

#[tokio::test]
async fn history_is_extended_not_replaced() {
    let first = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&btc_long(), close_btc())
        .await
        .unwrap();
    let reopened = first.clone().with_position(position("BTC", dec!(2), dec!(80)));

    let second = PositionCloser::new(Arc::new(closing_fill(dec!(40))))
        .close(&reopened, close_btc())
        .await
        .unwrap();

    assert_eq!(second.closed_positions.len(), 2);
    assert_eq!(second.trades.len(), 2);
    assert_eq!(second.closed_positions[0], first.closed_positions[0]);
}

#[tokio::test]
async fn partial_close_is_an_amount_mismatch() {
    let submitter = Arc::new(closing_fill(dec!(50)));
    let state = btc_long();

    let err = PositionCloser::new(submitter.clone())
        .close(&state, OrderParams::market(dec!(-1)).with_symbol("BTC"))
        .await
        .unwrap_err();

    assert_eq!(
        err.as_close(),
        Some(&CloseError::AmountMismatch {
            symbol: symbol("BTC"),
            open: dec!(2),
            requested: dec!(-1),
        })
    );
    assert!(err.to_string().contains("pos for 2"));
    assert_eq!(submitter.calls(), 0);
    assert_eq!(state.positions.len(), 1);
}

#[tokio::test]
async fn any_nonzero_residual_is_rejected() {
    for requested in [dec!(-1.99999999), dec!(-2.00000001), dec!(2), dec!(-4), dec!(0)] {
        let submitter = Arc::new(closing_fill(dec!(50)));
        let err = PositionCloser::new(submitter.clone())
            .close(&btc_long(), OrderParams::market(requested).with_symbol("BTC"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Close(CloseError::AmountMismatch { .. })),
            "expected mismatch for {requested}, got {err}"
        );
        assert_eq!(submitter.calls(), 0);
    }
}

#[tokio::test]
async fn overflowing_amount_sum_is_a_mismatch() {
    let submitter = Arc::new(closing_fill(dec!(50)));
    let state = state_with([position("BTC", Decimal::MAX, dec!(1))]);

    let err = PositionCloser::new(submitter.clone())
        .close(&state, OrderParams::market(Decimal::MAX).with_symbol("BTC"))
        .await
        .unwrap_err();

    assert_eq!(
        err.as_close(),
        Some(&CloseError::AmountMismatch {
            symbol: symbol("BTC"),
            open: Decimal::MAX,
            requested: Decimal::MAX,
        })
    );
    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn no_open_position_for_any_order() {
    let orders = [
        OrderParams::market(dec!(-2)).with_symbol("BTC"),
        OrderParams::market(dec!(2)).with_symbol("BTC"),
        OrderParams::limit(dec!(-1), dec!(100)).with_symbol("BTC"),
    ];
    let state = state_with([position("ETH", dec!(2), dec!(10))]);

    for params in orders {
        let submitter = Arc::new(closing_fill(dec!(50)));
        let err = PositionCloser::new(submitter.clone())
            .close(&state, params)
            .await
            .unwrap_err();

        assert_eq!(
            err.as_close(),
            Some(&CloseError::NoOpenPosition {
                symbol: symbol("BTC")
            })
        );
        assert_eq!(err.to_string(), "no position is currently open for BTC");
        assert_eq!(submitter.calls(), 0);
    }
}

#[tokio::test]
async fn zero_amount_record_counts_as_no_position() {
    let mut state = btc_long();
    state.positions.get_mut(&symbol("BTC")).unwrap().amount = Decimal::ZERO;

    let err = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, OrderParams::market(dec!(0)).with_symbol("BTC"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Close(CloseError::NoOpenPosition { .. })));
}

#[tokio::test]
async fn resolved_symbol_is_written_onto_the_order() {
    let submitter = Arc::new(closing_fill(dec!(50)));
    let state = btc_long().with_symbol("BTC");

    PositionCloser::new(submitter.clone())
        .close(&state, OrderParams::market(dec!(-2)))
        .await
        .unwrap();

    assert_eq!(submitter.seen()[0].symbol, Some(Symbol::new("BTC")));
}

#[tokio::test]
async fn missing_default_symbol_fails_before_lookup() {
    let state = state_with([
        position("BTC", dec!(2), dec!(75)),
        position("ETH", dec!(1), dec!(10)),
    ]);

    let err = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, OrderParams::market(dec!(-2)))
        .await
        .unwrap_err();

    assert_eq!(err.as_close(), Some(&CloseError::NoDefaultSymbol));
}

#[tokio::test]
async fn validation_error_propagates_unchanged() {
    let submitter = Arc::new(closing_fill(dec!(50)));
    let mut params = close_btc();
    params.order_type = closeout::domain::OrderType::Limit;

    let err = PositionCloser::new(submitter.clone())
        .close(&btc_long(), params)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingLimitPrice)
    ));
    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn submission_error_propagates_and_leaves_state_usable() {
    let submitter = Arc::new(
        ScriptedSubmitter::new().fail(SubmissionError::Rejected("insufficient margin".into())),
    );
    let state = btc_long();

    let err = PositionCloser::new(submitter)
        .close(&state, close_btc())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Submission(SubmissionError::Rejected(ref reason)) if reason == "insufficient margin"
    ));
    assert_eq!(state.positions.len(), 1);
    assert!(state.trades.is_empty());

    // The caller can retry with the untouched state.
    let next = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();
    assert!(next.positions.is_empty());
}

#[tokio::test]
async fn fill_hook_runs_before_close_hook() {
    let log = CallLog::new();
    let fill_hook = Arc::new(RecordingHook::new("fill", log.clone()));
    let close_hook = Arc::new(RecordingHook::new("close", log.clone()));
    let state = btc_long()
        .with_order_fill_hook(fill_hook.clone())
        .with_position_close_hook(close_hook.clone());

    PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    assert_eq!(log.calls(), vec!["fill", "close"]);
    assert_eq!(fill_hook.fills().len(), 1);
    assert_eq!(fill_hook.fills()[0].trade.price, dec!(100));

    let closes = close_hook.closes();
    assert_eq!(closes.len(), 1);
    assert_eq!(closes[0].position.closing_price, dec!(100));
    assert_eq!(closes[0].order.id, closes[0].trade.order_id);
}

#[tokio::test]
async fn backtesting_skips_fill_hook_only() {
    let log = CallLog::new();
    let state = btc_long()
        .with_backtesting(true)
        .with_order_fill_hook(Arc::new(RecordingHook::new("fill", log.clone())))
        .with_position_close_hook(Arc::new(RecordingHook::new("close", log.clone())));

    let next = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    assert_eq!(log.calls(), vec!["close"]);
    assert!(next.positions.is_empty());
}

#[tokio::test]
async fn hook_states_are_threaded_through() {
    let log = CallLog::new();
    let fill_hook = RecordingHook::new("fill", log.clone()).transforming(|s| s.with_symbol("FILL"));
    let close_hook = RecordingHook::new("close", log.clone()).transforming(|s| {
        assert_eq!(s.symbol, Some(Symbol::new("FILL")));
        s.with_symbol("CLOSE")
    });
    let state = btc_long()
        .with_order_fill_hook(Arc::new(fill_hook))
        .with_position_close_hook(Arc::new(close_hook));

    let next = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    assert_eq!(next.symbol, Some(Symbol::new("CLOSE")));
    assert!(next.positions.is_empty());
    assert_eq!(next.trades.len(), 1);
}

#[tokio::test]
async fn hook_dropping_history_is_rejected() {
    let fill = trade("BTC", dec!(2), dec!(75), dec!(0));
    let mut state = btc_long();
    state.trades.push(fill);
    let hook = RecordingHook::new("close", CallLog::new()).transforming(|mut s| {
        s.trades.clear();
        s
    });
    let state = state.with_position_close_hook(Arc::new(hook));

    let err = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Close(CloseError::MalformedState { .. })));
}

#[tokio::test]
async fn hook_adding_history_is_rejected() {
    let hook = RecordingHook::new("fill", CallLog::new()).transforming(|mut s| {
        s.trades.push(trade("BTC", dec!(1), dec!(90), dec!(0)));
        s
    });
    let state = btc_long().with_order_fill_hook(Arc::new(hook));

    let err = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Close(CloseError::MalformedState { .. })));
}

#[tokio::test]
async fn hook_failure_propagates() {
    let emitter = RecordingEmitter::new();
    let state = btc_long()
        .with_order_fill_hook(Arc::new(RecordingHook::new("fill", CallLog::new()).failing()))
        .with_emitter(Arc::new(emitter.clone()));

    let err = PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Hook(_)));
    assert!(emitter.is_empty());
}

#[tokio::test]
async fn emits_closed_position_data_with_zero_unrealized_pnl() {
    let emitter = RecordingEmitter::new();
    let state = btc_long().with_emitter(Arc::new(emitter.clone()));

    PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    let events = emitter.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "closed_position_data");
    let StrategyEvent::ClosedPositionData(payload) = &events[0];
    assert_eq!(payload.unrealized_pnl, Decimal::ZERO);
    assert_eq!(payload.realized_pnl, dec!(50));
    assert_eq!(payload.position.closing_price, dec!(100));
}

#[tokio::test]
async fn emits_in_backtesting_too() {
    let emitter = RecordingEmitter::new();
    let state = btc_long()
        .with_backtesting(true)
        .with_emitter(Arc::new(emitter.clone()));

    PositionCloser::new(Arc::new(closing_fill(dec!(50))))
        .close(&state, close_btc())
        .await
        .unwrap();

    assert_eq!(emitter.len(), 1);
}
