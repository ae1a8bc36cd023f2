//! BackLab CLI — run a backtest on a CSV bar series, or sweep a parameter grid.
//!
//! Commands:
//! - `run` — execute one backtest and print metrics as JSON
//! - `sweep` — run the default parameter grid for a strategy kind and print
//!   a leaderboard ranked by annualized Sharpe

use anyhow::{bail, Context, Result};
use backlab_core::strategy::Strategy;
use backlab_core::{run_backtest, BacktestConfig};
use backlab_runner::{rank_by_sharpe, run_sweep, write_artifacts, LoadOptions, ParamGrid};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backlab", about = "BackLab CLI — daily-bar backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one backtest and print its metrics as JSON.
    Run {
        /// Path to a CSV bar file (date,open,high,low,close,volume).
        #[arg(long)]
        data: PathBuf,

        /// Strategy kind: sma_cross, donchian_breakout, momentum.
        #[arg(long)]
        strategy: String,

        /// Start date (YYYY-MM-DD), inclusive. Defaults to the whole series.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive. Defaults to the whole series.
        #[arg(long)]
        end: Option<String>,

        /// Initial cash.
        #[arg(long, default_value_t = 100_000.0)]
        cash: f64,

        /// Commission as a fraction of the closing leg's notional.
        #[arg(long, default_value_t = 0.0)]
        commission: f64,

        /// Fast SMA window (sma_cross only).
        #[arg(long)]
        fast: Option<usize>,

        /// Slow SMA window (sma_cross only).
        #[arg(long)]
        slow: Option<usize>,

        /// Entry channel window (donchian_breakout only).
        #[arg(long)]
        entry_window: Option<usize>,

        /// Exit channel window (donchian_breakout only).
        #[arg(long)]
        exit_window: Option<usize>,

        /// Lookback in bars (momentum only).
        #[arg(long)]
        lookback: Option<usize>,

        /// Entry threshold on the lookback return (momentum only).
        #[arg(long)]
        threshold: Option<f64>,

        /// ATR window for position sizing.
        #[arg(long)]
        atr_window: Option<usize>,

        /// ATR stop multiple for position sizing.
        #[arg(long)]
        atr_k: Option<f64>,

        /// Fraction of equity risked per entry.
        #[arg(long)]
        risk_perc: Option<f64>,

        /// Directory to write trades.csv, equity.csv, and report.json into.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Sweep the default parameter grid for a strategy kind.
    Sweep {
        /// Path to a CSV bar file (date,open,high,low,close,volume).
        #[arg(long)]
        data: PathBuf,

        /// Strategy kind: sma_cross, donchian_breakout, momentum.
        #[arg(long)]
        strategy: String,

        /// Start date (YYYY-MM-DD), inclusive. Defaults to the whole series.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive. Defaults to the whole series.
        #[arg(long)]
        end: Option<String>,

        /// Initial cash.
        #[arg(long, default_value_t = 100_000.0)]
        cash: f64,

        /// Commission as a fraction of the closing leg's notional.
        #[arg(long, default_value_t = 0.0)]
        commission: f64,
    },
}

#[derive(Default)]
struct ParamOverrides {
    fast: Option<usize>,
    slow: Option<usize>,
    entry_window: Option<usize>,
    exit_window: Option<usize>,
    lookback: Option<usize>,
    threshold: Option<f64>,
    atr_window: Option<usize>,
    atr_k: Option<f64>,
    risk_perc: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            strategy,
            start,
            end,
            cash,
            commission,
            fast,
            slow,
            entry_window,
            exit_window,
            lookback,
            threshold,
            atr_window,
            atr_k,
            risk_perc,
            out,
        } => {
            let overrides = ParamOverrides {
                fast,
                slow,
                entry_window,
                exit_window,
                lookback,
                threshold,
                atr_window,
                atr_k,
                risk_perc,
            };
            run_cmd(
                data, &strategy, start, end, cash, commission, overrides, out,
            )
        }
        Commands::Sweep {
            data,
            strategy,
            start,
            end,
            cash,
            commission,
        } => sweep_cmd(data, &strategy, start, end, cash, commission),
    }
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
        })
        .transpose()
}

fn build_strategy(kind: &str, overrides: &ParamOverrides) -> Result<Strategy> {
    let mut strategy: Strategy = kind.parse()?;

    match &mut strategy {
        Strategy::SmaCross(p) => {
            if overrides.entry_window.is_some()
                || overrides.exit_window.is_some()
                || overrides.lookback.is_some()
                || overrides.threshold.is_some()
            {
                bail!("--entry-window/--exit-window/--lookback/--threshold do not apply to sma_cross");
            }
            if let Some(fast) = overrides.fast {
                p.fast = fast;
            }
            if let Some(slow) = overrides.slow {
                p.slow = slow;
            }
            if let Some(w) = overrides.atr_window {
                p.atr_window = w;
            }
            if let Some(k) = overrides.atr_k {
                p.atr_k = k;
            }
            if let Some(r) = overrides.risk_perc {
                p.risk_perc = r;
            }
        }
        Strategy::DonchianBreakout(p) => {
            if overrides.fast.is_some()
                || overrides.slow.is_some()
                || overrides.lookback.is_some()
                || overrides.threshold.is_some()
            {
                bail!("--fast/--slow/--lookback/--threshold do not apply to donchian_breakout");
            }
            if let Some(w) = overrides.entry_window {
                p.entry_window = w;
            }
            if let Some(w) = overrides.exit_window {
                p.exit_window = w;
            }
            if let Some(w) = overrides.atr_window {
                p.atr_window = w;
            }
            if let Some(k) = overrides.atr_k {
                p.atr_k = k;
            }
            if let Some(r) = overrides.risk_perc {
                p.risk_perc = r;
            }
        }
        Strategy::Momentum(p) => {
            if overrides.fast.is_some()
                || overrides.slow.is_some()
                || overrides.entry_window.is_some()
                || overrides.exit_window.is_some()
            {
                bail!("--fast/--slow/--entry-window/--exit-window do not apply to momentum");
            }
            if let Some(l) = overrides.lookback {
                p.lookback = l;
            }
            if let Some(t) = overrides.threshold {
                p.threshold = t;
            }
            if let Some(w) = overrides.atr_window {
                p.atr_window = w;
            }
            if let Some(k) = overrides.atr_k {
                p.atr_k = k;
            }
            if let Some(r) = overrides.risk_perc {
                p.risk_perc = r;
            }
        }
    }

    Ok(strategy)
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    data: PathBuf,
    kind: &str,
    start: Option<String>,
    end: Option<String>,
    cash: f64,
    commission: f64,
    overrides: ParamOverrides,
    out: Option<PathBuf>,
) -> Result<()> {
    let opts = LoadOptions {
        start: parse_date(start.as_deref())?,
        end: parse_date(end.as_deref())?,
    };
    let bars = backlab_runner::load_bars_csv(&data, opts)?;

    let mut config = BacktestConfig::new(build_strategy(kind, &overrides)?);
    config.initial_cash = cash;
    config.commission_rate = commission;

    let report = run_backtest(&bars, &config)?;

    println!("{}", serde_json::to_string_pretty(&report.metrics)?);

    if let Some(dir) = out {
        write_artifacts(&dir, &report)?;
        eprintln!("Artifacts saved to: {}", dir.display());
    }

    Ok(())
}

fn sweep_cmd(
    data: PathBuf,
    kind: &str,
    start: Option<String>,
    end: Option<String>,
    cash: f64,
    commission: f64,
) -> Result<()> {
    let opts = LoadOptions {
        start: parse_date(start.as_deref())?,
        end: parse_date(end.as_deref())?,
    };
    let bars = backlab_runner::load_bars_csv(&data, opts)?;

    let grid = match kind {
        "sma_cross" => ParamGrid::sma_cross_default(),
        "donchian_breakout" => ParamGrid::donchian_default(),
        "momentum" => ParamGrid::momentum_default(),
        other => bail!("unknown strategy kind '{other}'. Valid: sma_cross, donchian_breakout, momentum"),
    };

    let mut base = BacktestConfig::new(kind.parse::<Strategy>()?);
    base.initial_cash = cash;
    base.commission_rate = commission;

    let configs = grid.generate_configs(&base);
    let mut outcomes = run_sweep(&bars, &configs)?;
    rank_by_sharpe(&mut outcomes);

    println!(
        "{:<44} {:>10} {:>10} {:>8} {:>7}",
        "Parameters", "Final", "Sharpe", "MaxDD%", "Trades"
    );
    println!("{}", "-".repeat(84));
    for outcome in &outcomes {
        let params = serde_json::to_string(&outcome.config.strategy)?;
        let sharpe = outcome
            .metrics
            .sharpe_annualized
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "{:<44} {:>10.2} {:>10} {:>8.2} {:>7}",
            params,
            outcome.metrics.final_value,
            sharpe,
            outcome.metrics.max_drawdown_pct,
            outcome.metrics.total_trades,
        );
    }

    Ok(())
}
