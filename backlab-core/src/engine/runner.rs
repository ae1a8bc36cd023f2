//! Bar-by-bar replay loop — the heart of the engine.
//!
//! Per bar, in order: mark equity at the close, ask the strategy for an
//! action, execute it against the broker, record any closed trade, append
//! the daily equity snapshot. Bar `i+1` never starts before bar `i` finishes;
//! strategies see the position and cash state exactly as earlier bars left it.

use crate::broker::Broker;
use crate::collectors::{EquityCurve, TradeLog};
use crate::domain::{Bar, EquitySnapshot, Trade};
use crate::engine::BacktestConfig;
use crate::error::EngineError;
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};

/// Complete result of one run: ledgers, metrics, and the input echo.
///
/// The engine assigns no identifiers; `config_hash` is the deterministic
/// audit handle the persistence layer can key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub config: BacktestConfig,
    pub config_hash: String,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquitySnapshot>,
    pub metrics: Metrics,
}

/// Replay `bars` through the configured strategy.
///
/// Input errors (bad parameters, empty series) surface before the loop runs;
/// a run either returns a complete report or nothing. Warm-up indicators,
/// zero ATR, and empty trade histories are absorbed by policy inside the loop
/// and never fail the run.
pub fn run_backtest(bars: &[Bar], config: &BacktestConfig) -> Result<BacktestReport, EngineError> {
    config.validate()?;
    if bars.is_empty() {
        return Err(EngineError::NoDataForPeriod);
    }

    let indicators = config.strategy.indicators(bars);
    let mut broker = Broker::new(config.initial_cash, config.commission_rate);
    let mut trade_log = TradeLog::default();
    let mut equity_curve = EquityCurve::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let equity = broker.equity(bar.close);
        let action = config
            .strategy
            .decide(bars, i, &indicators, broker.position(), equity);

        if let Some(trade) = broker.execute(action, bar) {
            trade_log.record(trade);
        }

        equity_curve.observe(bar.date, &broker, bar.close);
    }

    let metrics = Metrics::compute(
        equity_curve.snapshots(),
        trade_log.trades(),
        config.initial_cash,
    );

    Ok(BacktestReport {
        config: config.clone(),
        config_hash: config.config_hash(),
        trades: trade_log.into_trades(),
        equity_curve: equity_curve.into_snapshots(),
        metrics,
    })
}
