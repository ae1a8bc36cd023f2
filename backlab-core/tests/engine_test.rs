//! End-to-end engine scenarios over small synthetic bar series.

use backlab_core::domain::{Bar, Side};
use backlab_core::strategy::{DonchianBreakout, MomentumTf, SmaCross, Strategy};
use backlab_core::{run_backtest, BacktestConfig, EngineError};
use chrono::NaiveDate;

/// Synthetic bars from closes: open = prev close, high = max(open, close) + 1,
/// low = min(open, close) - 1.
fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

fn sma_3_5_config() -> BacktestConfig {
    BacktestConfig::new(Strategy::SmaCross(SmaCross {
        fast: 3,
        slow: 5,
        atr_window: 3,
        atr_k: 2.0,
        risk_perc: 0.01,
    }))
}

/// The reference SMA-cross scenario: a rising run then a fall produces exactly
/// one round trip.
///
/// With unit-step closes the true range is a constant 3.0, so ATR = 3 and the
/// sizer buys floor(100000 * 0.01 / 6) = 166 shares. The fast SMA is above
/// the slow one on the first bar both are defined (index 4, entry at close 14)
/// and crosses below at index 7 (exit at close 11).
#[test]
fn sma_cross_single_round_trip() {
    let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 11.0, 10.0, 9.0]);
    let report = run_backtest(&bars, &sma_3_5_config()).unwrap();

    assert_eq!(report.equity_curve.len(), 10);
    assert_eq!(report.trades.len(), 1);

    let trade = &report.trades[0];
    assert_eq!(trade.side, Side::Sell);
    assert_eq!(trade.size, 166);
    assert_eq!(trade.price, 11.0);
    assert_eq!(trade.pnl, 166.0 * (11.0 - 14.0));
    assert_eq!(trade.close_date, bars[7].date);

    // Entry bar: cash debited, equity preserved at the entry close.
    let entry_snap = &report.equity_curve[4];
    assert_eq!(entry_snap.position_size, 166);
    assert_eq!(entry_snap.cash, 100_000.0 - 166.0 * 14.0);
    assert_eq!(entry_snap.equity, 100_000.0);

    // Exit bar onward: flat, equity settled at the realized loss.
    let exit_snap = &report.equity_curve[7];
    assert_eq!(exit_snap.position_size, 0);
    assert_eq!(exit_snap.equity, 99_502.0);
    assert_eq!(report.metrics.final_value, 99_502.0);
    assert!((report.metrics.return_pct.unwrap() - (-0.00498)).abs() < 1e-12);
    assert_eq!(report.metrics.total_trades, 1);
    assert_eq!(report.metrics.won, 0);
    assert_eq!(report.metrics.lost, 1);
    assert!((report.metrics.max_drawdown_pct - (-0.498)).abs() < 1e-9);
}

#[test]
fn donchian_without_breakout_never_trades() {
    // Monotonically falling closes: today's close never exceeds the prior
    // window's highest high.
    let closes: Vec<f64> = (0..15).map(|i| 20.0 - i as f64 * 0.5).collect();
    let bars = make_bars(&closes);

    let config = BacktestConfig::new(Strategy::DonchianBreakout(DonchianBreakout {
        entry_window: 3,
        exit_window: 2,
        atr_window: 2,
        atr_k: 2.0,
        risk_perc: 0.01,
    }));
    let report = run_backtest(&bars, &config).unwrap();

    assert!(report.trades.is_empty());
    assert_eq!(report.equity_curve.len(), bars.len());
    assert_eq!(report.metrics.return_pct, Some(0.0));
    assert_eq!(report.metrics.max_drawdown_pct, 0.0);
    // A flat equity curve has no defined Sharpe.
    assert_eq!(report.metrics.sharpe_annualized, None);
}

#[test]
fn momentum_enters_on_threshold_and_flattens_at_zero() {
    let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 12.0, 11.0, 10.0]);
    let config = BacktestConfig::new(Strategy::Momentum(MomentumTf {
        lookback: 2,
        threshold: 0.0,
        atr_window: 2,
        atr_k: 2.0,
        risk_perc: 0.01,
    }));
    let report = run_backtest(&bars, &config).unwrap();

    // Enter at index 2 (first defined momentum, 0.2 > 0), exit at index 4
    // where the 2-bar return hits exactly zero.
    assert_eq!(report.trades.len(), 1);
    let trade = &report.trades[0];
    assert_eq!(trade.close_date, bars[4].date);
    assert_eq!(trade.price, 12.0);
    assert_eq!(trade.pnl, 0.0);
    // Zero pnl is not a win.
    assert_eq!(report.metrics.won, 0);
    assert_eq!(report.metrics.lost, 1);
}

#[test]
fn commission_reduces_pnl_and_final_value() {
    let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 11.0, 10.0, 9.0]);
    let mut config = sma_3_5_config();
    config.commission_rate = 0.001;
    let report = run_backtest(&bars, &config).unwrap();

    let commission = 0.001 * 166.0 * 11.0;
    let trade = &report.trades[0];
    assert!((trade.pnl - (166.0 * -3.0 - commission)).abs() < 1e-9);
    assert!((report.metrics.final_value - (99_502.0 - commission)).abs() < 1e-9);
}

#[test]
fn empty_series_returns_no_data() {
    assert_eq!(
        run_backtest(&[], &sma_3_5_config()),
        Err(EngineError::NoDataForPeriod)
    );
}

#[test]
fn unknown_strategy_kind_is_rejected() {
    assert_eq!(
        Strategy::from_kind("bollinger"),
        Err(EngineError::InvalidStrategyKind("bollinger".into()))
    );
}

#[test]
fn non_positive_windows_are_rejected_before_the_run() {
    let bars = make_bars(&[10.0, 11.0, 12.0]);
    let config = BacktestConfig::new(Strategy::Momentum(MomentumTf {
        lookback: 0,
        ..MomentumTf::default()
    }));
    assert!(matches!(
        run_backtest(&bars, &config),
        Err(EngineError::InvalidParameters(_))
    ));
}
