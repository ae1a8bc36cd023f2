//! Time-series momentum with ATR-risk sizing.
//!
//! - Enter long when the lookback return exceeds `threshold`.
//! - Exit when the lookback return drops to zero or below (simple flattening).
//! - Size = floor(equity * risk_perc / (atr_k * ATR)).

use crate::domain::{Bar, Position};
use crate::indicators;
use crate::sizing::risk_position_size;
use crate::strategy::sma_cross::validate_risk_params;
use crate::strategy::{Action, IndicatorSet};
use crate::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumTf {
    pub lookback: usize,
    pub threshold: f64,
    pub atr_window: usize,
    pub atr_k: f64,
    pub risk_perc: f64,
}

impl Default for MomentumTf {
    fn default() -> Self {
        Self {
            lookback: 60,
            threshold: 0.0,
            atr_window: 14,
            atr_k: 2.0,
            risk_perc: 0.01,
        }
    }
}

impl MomentumTf {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lookback == 0 {
            return Err(EngineError::InvalidParameters(
                "momentum lookback must be > 0".into(),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(EngineError::InvalidParameters(
                "momentum threshold must be finite".into(),
            ));
        }
        validate_risk_params(self.atr_window, self.atr_k, self.risk_perc)
    }

    pub fn indicators(&self, bars: &[Bar]) -> IndicatorSet {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        IndicatorSet::Momentum {
            mom: indicators::momentum(&closes, self.lookback),
            atr: indicators::atr(bars, self.atr_window),
        }
    }

    pub fn decide(
        &self,
        i: usize,
        mom: &[f64],
        atr: &[f64],
        position: Option<&Position>,
        equity: f64,
    ) -> Action {
        match position {
            None => {
                // NaN momentum (warm-up) fails the comparison and holds.
                if mom[i] > self.threshold {
                    let size = risk_position_size(equity, atr[i], self.atr_k, self.risk_perc);
                    if size > 0 {
                        return Action::EnterLong(size);
                    }
                }
                Action::Hold
            }
            Some(_) => {
                if mom[i] <= 0.0 {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }
}
