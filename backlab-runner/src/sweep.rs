//! Parameter sweeps — grid search over strategy parameters.
//!
//! Independent runs share no mutable state, so a sweep is embarrassingly
//! parallel: each configuration gets its own broker, ledgers, and report.
//! rayon does the fan-out.

use backlab_core::domain::Bar;
use backlab_core::metrics::Metrics;
use backlab_core::strategy::{DonchianBreakout, MomentumTf, SmaCross, Strategy};
use backlab_core::{run_backtest, BacktestConfig, EngineError};
use rayon::prelude::*;
use serde::Serialize;

/// Parameter grid for one strategy kind.
///
/// `generate_configs` skips invalid combinations (e.g. fast >= slow) instead
/// of surfacing them as validation errors mid-sweep.
#[derive(Debug, Clone)]
pub enum ParamGrid {
    SmaCross {
        fast_windows: Vec<usize>,
        slow_windows: Vec<usize>,
    },
    Donchian {
        entry_windows: Vec<usize>,
        exit_windows: Vec<usize>,
    },
    Momentum {
        lookbacks: Vec<usize>,
        thresholds: Vec<f64>,
    },
}

impl ParamGrid {
    /// The classic fast/slow grid: 10/20/30 against 50/100/200.
    pub fn sma_cross_default() -> Self {
        ParamGrid::SmaCross {
            fast_windows: vec![10, 20, 30],
            slow_windows: vec![50, 100, 200],
        }
    }

    pub fn donchian_default() -> Self {
        ParamGrid::Donchian {
            entry_windows: vec![20, 40, 55],
            exit_windows: vec![10, 20],
        }
    }

    pub fn momentum_default() -> Self {
        ParamGrid::Momentum {
            lookbacks: vec![20, 60, 120],
            thresholds: vec![0.0, 0.02, 0.05],
        }
    }

    /// All valid configurations in the grid, sharing `base`'s run-level
    /// parameters (cash, commission) and the per-kind risk defaults.
    pub fn generate_configs(&self, base: &BacktestConfig) -> Vec<BacktestConfig> {
        let mut configs = Vec::new();
        match self {
            ParamGrid::SmaCross {
                fast_windows,
                slow_windows,
            } => {
                for &fast in fast_windows {
                    for &slow in slow_windows {
                        if fast >= slow {
                            continue;
                        }
                        let mut config = base.clone();
                        config.strategy = Strategy::SmaCross(SmaCross {
                            fast,
                            slow,
                            ..SmaCross::default()
                        });
                        configs.push(config);
                    }
                }
            }
            ParamGrid::Donchian {
                entry_windows,
                exit_windows,
            } => {
                for &entry_window in entry_windows {
                    for &exit_window in exit_windows {
                        let mut config = base.clone();
                        config.strategy = Strategy::DonchianBreakout(DonchianBreakout {
                            entry_window,
                            exit_window,
                            ..DonchianBreakout::default()
                        });
                        configs.push(config);
                    }
                }
            }
            ParamGrid::Momentum {
                lookbacks,
                thresholds,
            } => {
                for &lookback in lookbacks {
                    for &threshold in thresholds {
                        let mut config = base.clone();
                        config.strategy = Strategy::Momentum(MomentumTf {
                            lookback,
                            threshold,
                            ..MomentumTf::default()
                        });
                        configs.push(config);
                    }
                }
            }
        }
        configs
    }
}

/// One grid point's result: the config, its audit hash, and the metrics.
/// Full ledgers are dropped to keep large sweeps light; re-run the winning
/// config for the complete report.
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub config: BacktestConfig,
    pub config_hash: String,
    pub metrics: Metrics,
}

/// Run every configuration against the same bar series, in parallel.
///
/// The bar series is shared read-only; each task owns its entire run state.
pub fn run_sweep(
    bars: &[Bar],
    configs: &[BacktestConfig],
) -> Result<Vec<SweepOutcome>, EngineError> {
    configs
        .par_iter()
        .map(|config| {
            let report = run_backtest(bars, config)?;
            Ok(SweepOutcome {
                config: config.clone(),
                config_hash: report.config_hash,
                metrics: report.metrics,
            })
        })
        .collect()
}

/// Sort outcomes best-first by annualized Sharpe; undefined Sharpe ranks last.
pub fn rank_by_sharpe(outcomes: &mut [SweepOutcome]) {
    outcomes.sort_by(|a, b| {
        let sa = a.metrics.sharpe_annualized.unwrap_or(f64::NEG_INFINITY);
        let sb = b.metrics.sharpe_annualized.unwrap_or(f64::NEG_INFINITY);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(n: usize) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.05;
                Bar {
                    date: base_date + chrono::Duration::days(i as i64),
                    open: close - 0.2,
                    high: close + 1.0,
                    low: close - 1.2,
                    close,
                    volume: 10_000.0,
                }
            })
            .collect()
    }

    #[test]
    fn sma_grid_skips_degenerate_pairs() {
        let grid = ParamGrid::SmaCross {
            fast_windows: vec![10, 50],
            slow_windows: vec![20, 50],
        };
        let base = BacktestConfig::new(Strategy::SmaCross(SmaCross::default()));
        let configs = grid.generate_configs(&base);
        // (10,20), (10,50): kept; (50,20), (50,50): skipped.
        assert_eq!(configs.len(), 2);
        assert!(configs.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn sweep_produces_one_outcome_per_config() {
        let bars = make_bars(120);
        let base = BacktestConfig::new(Strategy::Momentum(MomentumTf::default()));
        let configs = ParamGrid::momentum_default().generate_configs(&base);
        let outcomes = run_sweep(&bars, &configs).unwrap();
        assert_eq!(outcomes.len(), configs.len());
    }

    #[test]
    fn sweep_outcomes_match_single_runs() {
        let bars = make_bars(90);
        let base = BacktestConfig::new(Strategy::SmaCross(SmaCross::default()));
        let grid = ParamGrid::SmaCross {
            fast_windows: vec![3, 5],
            slow_windows: vec![10],
        };
        let configs = grid.generate_configs(&base);
        let outcomes = run_sweep(&bars, &configs).unwrap();

        for (config, outcome) in configs.iter().zip(&outcomes) {
            let report = run_backtest(&bars, config).unwrap();
            assert_eq!(outcome.metrics, report.metrics);
            assert_eq!(outcome.config_hash, report.config_hash);
        }
    }

    #[test]
    fn ranking_puts_undefined_sharpe_last() {
        let bars = make_bars(90);
        let base = BacktestConfig::new(Strategy::SmaCross(SmaCross::default()));
        // slow window larger than the series: never trades, flat curve, no Sharpe.
        let grid = ParamGrid::SmaCross {
            fast_windows: vec![3, 100],
            slow_windows: vec![10, 200],
        };
        let mut outcomes = run_sweep(&bars, &grid.generate_configs(&base)).unwrap();
        rank_by_sharpe(&mut outcomes);

        let defined: Vec<bool> = outcomes
            .iter()
            .map(|o| o.metrics.sharpe_annualized.is_some())
            .collect();
        // Once an undefined Sharpe appears, no defined one follows.
        let first_none = defined.iter().position(|d| !d).unwrap_or(defined.len());
        assert!(defined[first_none..].iter().all(|d| !d));
    }
}
