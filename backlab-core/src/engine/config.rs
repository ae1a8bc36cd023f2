//! Run configuration and its deterministic audit hash.

use crate::error::EngineError;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// Everything a single run needs from the request layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_cash: f64,
    /// Commission as a fraction of the closing leg's notional.
    pub commission_rate: f64,
    pub strategy: Strategy,
}

impl BacktestConfig {
    /// Config with the request schema's run-level defaults.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            initial_cash: 100_000.0,
            commission_rate: 0.0,
            strategy,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.initial_cash.is_finite() || self.initial_cash < 0.0 {
            return Err(EngineError::InvalidParameters(
                "initial cash must be a non-negative finite number".into(),
            ));
        }
        if !self.commission_rate.is_finite()
            || self.commission_rate < 0.0
            || self.commission_rate >= 1.0
        {
            return Err(EngineError::InvalidParameters(
                "commission rate must be in [0, 1)".into(),
            ));
        }
        self.strategy.validate()
    }

    /// Deterministic identity of this configuration, for the audit echo.
    ///
    /// blake3 over the canonical JSON serialization; struct fields serialize
    /// in declaration order, so equal configs always hash equally.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("BacktestConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
