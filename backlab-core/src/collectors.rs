//! Ledger collectors — run-scoped accumulators for trades and daily equity.
//!
//! Both are driven by the runner each bar and frozen when the run ends; the
//! metrics calculator only ever sees their finished, immutable contents.
//! No statistic is updated as a side effect of the replay loop itself.

use crate::broker::Broker;
use crate::domain::{EquitySnapshot, Trade};
use chrono::NaiveDate;

/// Accumulates closed trades, in close order.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn record(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }
}

/// Accumulates one equity snapshot per bar, unconditionally.
#[derive(Debug, Default)]
pub struct EquityCurve {
    snapshots: Vec<EquitySnapshot>,
}

impl EquityCurve {
    pub fn with_capacity(bars: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(bars),
        }
    }

    /// Record the post-action broker state for this bar.
    pub fn observe(&mut self, date: NaiveDate, broker: &Broker, close: f64) {
        self.snapshots.push(EquitySnapshot {
            date,
            position_size: broker.position_size(),
            cash: broker.cash(),
            equity: broker.equity(close),
        });
    }

    pub fn snapshots(&self) -> &[EquitySnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<EquitySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Side};
    use crate::strategy::Action;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn equity_curve_appends_every_observation() {
        let broker = Broker::new(10_000.0, 0.0);
        let mut curve = EquityCurve::with_capacity(3);
        for day in 2..5 {
            curve.observe(bar(day, 100.0).date, &broker, 100.0);
        }
        assert_eq!(curve.snapshots().len(), 3);
        assert!(curve.snapshots().iter().all(|s| s.equity == 10_000.0));
    }

    #[test]
    fn snapshot_reflects_open_position() {
        let mut broker = Broker::new(10_000.0, 0.0);
        broker.execute(Action::EnterLong(50), &bar(2, 100.0));
        let mut curve = EquityCurve::default();
        curve.observe(bar(2, 100.0).date, &broker, 100.0);

        let snap = &curve.snapshots()[0];
        assert_eq!(snap.position_size, 50);
        assert_eq!(snap.cash, 5_000.0);
        assert_eq!(snap.equity, snap.cash + 50.0 * 100.0);
    }

    #[test]
    fn trade_log_preserves_order() {
        let mut log = TradeLog::default();
        for day in [3, 7] {
            log.record(Trade {
                close_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                side: Side::Sell,
                price: 10.0,
                size: 1,
                pnl: 0.0,
            });
        }
        let trades = log.into_trades();
        assert_eq!(trades.len(), 2);
        assert!(trades[0].close_date < trades[1].close_date);
    }
}
