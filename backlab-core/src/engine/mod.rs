//! Backtest engine — run configuration and the bar-by-bar replay loop.
//!
//! One call in, one result out: the runner takes a bar series and a validated
//! configuration by value/reference and returns the full ledgers plus metrics.
//! It holds no state after returning and shares nothing between runs.

pub mod config;
pub mod runner;

pub use config::BacktestConfig;
pub use runner::{run_backtest, BacktestReport};
