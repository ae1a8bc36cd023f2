//! Backlab Core — daily-bar backtest engine for rule-based trend-following strategies.
//!
//! The crate replays an ordered series of OHLCV bars through one of three
//! strategy variants and produces an auditable ledger of trades, a daily equity
//! curve, and summary performance metrics:
//! - Domain types (bars, positions, trades, equity snapshots)
//! - Indicator library (SMA, ATR, rolling highest/lowest, lookback return)
//! - Risk-based position sizing
//! - Strategy state machine (SMA cross, Donchian breakout, momentum)
//! - Broker simulator (cash/position/commission, whole-position market orders)
//! - Ledger collectors and a pure post-run metrics calculator
//!
//! The replay loop is strictly sequential per run; independent runs share no
//! state and may execute in parallel (see `backlab-runner` for sweeps).

pub mod broker;
pub mod collectors;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod sizing;
pub mod strategy;

pub use engine::{run_backtest, BacktestConfig, BacktestReport};
pub use error::EngineError;
