//! Performance metrics — pure functions over the finished ledgers.
//!
//! Computed once, after the replay loop returns. Degenerate inputs (empty
//! curves, zero variance, zero initial cash) yield 0 or `None`, never an
//! error and never an artificial infinity.

use crate::domain::{EquitySnapshot, Trade};
use serde::{Deserialize, Serialize};

/// Trading days per year, used to annualize the Sharpe ratio.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics for a single run. `None` fields serialize as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub final_value: f64,
    /// Fractional return on initial cash; `None` when initial cash is zero.
    pub return_pct: Option<f64>,
    /// Most negative peak-to-trough decline, in percent (<= 0).
    pub max_drawdown_pct: f64,
    /// Annualized Sharpe; `None` with fewer than 2 returns or zero variance.
    pub sharpe_annualized: Option<f64>,
    pub total_trades: usize,
    pub won: usize,
    pub lost: usize,
}

impl Metrics {
    pub fn compute(snapshots: &[EquitySnapshot], trades: &[Trade], initial_cash: f64) -> Self {
        let equity: Vec<f64> = snapshots.iter().map(|s| s.equity).collect();
        let final_value = equity.last().copied().unwrap_or(initial_cash);

        let return_pct = if initial_cash != 0.0 {
            Some(final_value / initial_cash - 1.0)
        } else {
            None
        };

        let won = trades.iter().filter(|t| t.is_winner()).count();

        Self {
            final_value,
            return_pct,
            max_drawdown_pct: max_drawdown(&equity) * 100.0,
            sharpe_annualized: sharpe_annualized(&equity),
            total_trades: trades.len(),
            won,
            lost: trades.len() - won,
        }
    }
}

/// Maximum drawdown as a negative fraction (e.g. -0.15 = 15% decline).
///
/// Returns 0.0 if the curve is empty, constant, or monotonically increasing.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from daily equity returns.
///
/// `mean(returns) / std(returns) * sqrt(252)`. `None` when the return series
/// has fewer than 2 points or zero variance — a flat curve has no defined
/// risk-adjusted return, and inflating it to infinity would poison rankings.
pub fn sharpe_annualized(equity: &[f64]) -> Option<f64> {
    let returns = daily_returns(equity);
    if returns.len() < 2 {
        return None;
    }
    let std = std_dev(&returns);
    if std < 1e-15 {
        return None;
    }
    Some(mean(&returns) / std * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Day-over-day fractional returns; a non-positive base carries a 0 return.
pub fn daily_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
