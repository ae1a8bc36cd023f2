//! SMA crossover with ATR-risk sizing.
//!
//! - Enter long when the fast SMA crosses above the slow SMA on this bar.
//! - Exit when the fast SMA crosses below the slow SMA.
//! - Size = floor(equity * risk_perc / (atr_k * ATR)).
//!
//! Crossovers are edge-triggered: the fast series being above the slow one is
//! not itself a signal, only the bar-to-bar transition is. The transition out
//! of the warm-up window counts as an edge — on the first bar where both SMAs
//! are defined, fast already above slow triggers an entry.

use crate::domain::Position;
use crate::indicators;
use crate::sizing::risk_position_size;
use crate::strategy::{Action, IndicatorSet};
use crate::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaCross {
    pub fast: usize,
    pub slow: usize,
    pub atr_window: usize,
    pub atr_k: f64,
    pub risk_perc: f64,
}

impl Default for SmaCross {
    fn default() -> Self {
        Self {
            fast: 20,
            slow: 50,
            atr_window: 14,
            atr_k: 2.0,
            risk_perc: 0.01,
        }
    }
}

impl SmaCross {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fast == 0 || self.slow == 0 {
            return Err(EngineError::InvalidParameters(
                "SMA windows must be > 0".into(),
            ));
        }
        if self.fast >= self.slow {
            return Err(EngineError::InvalidParameters(format!(
                "fast window ({}) must be smaller than slow window ({})",
                self.fast, self.slow
            )));
        }
        validate_risk(self.atr_window, self.atr_k, self.risk_perc)
    }

    pub fn indicators(&self, bars: &[crate::domain::Bar]) -> IndicatorSet {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        IndicatorSet::SmaCross {
            fast: indicators::sma(&closes, self.fast),
            slow: indicators::sma(&closes, self.slow),
            atr: indicators::atr(bars, self.atr_window),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn decide(
        &self,
        i: usize,
        fast: &[f64],
        slow: &[f64],
        atr: &[f64],
        position: Option<&Position>,
        equity: f64,
    ) -> Action {
        match position {
            None => {
                if crossed_above(fast, slow, i) {
                    let size = risk_position_size(equity, atr[i], self.atr_k, self.risk_perc);
                    if size > 0 {
                        return Action::EnterLong(size);
                    }
                }
                Action::Hold
            }
            Some(_) => {
                if crossed_below(fast, slow, i) {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }
}

/// Edge-triggered upward cross at bar `i`: fast > slow now, and on the
/// previous bar fast <= slow or either series was still undefined.
fn crossed_above(fast: &[f64], slow: &[f64], i: usize) -> bool {
    if !(fast[i] > slow[i]) {
        return false;
    }
    if i == 0 {
        return true;
    }
    let prev_defined = !fast[i - 1].is_nan() && !slow[i - 1].is_nan();
    !prev_defined || fast[i - 1] <= slow[i - 1]
}

/// Edge-triggered downward cross at bar `i`.
fn crossed_below(fast: &[f64], slow: &[f64], i: usize) -> bool {
    if !(fast[i] < slow[i]) {
        return false;
    }
    if i == 0 {
        return true;
    }
    let prev_defined = !fast[i - 1].is_nan() && !slow[i - 1].is_nan();
    !prev_defined || fast[i - 1] >= slow[i - 1]
}

pub(crate) fn validate_risk(atr_window: usize, atr_k: f64, risk_perc: f64) -> Result<(), EngineError> {
    if atr_window == 0 {
        return Err(EngineError::InvalidParameters(
            "ATR window must be > 0".into(),
        ));
    }
    if !(atr_k > 0.0) {
        return Err(EngineError::InvalidParameters(
            "ATR multiple must be > 0".into(),
        ));
    }
    if !(risk_perc > 0.0 && risk_perc <= 1.0) {
        return Err(EngineError::InvalidParameters(
            "risk fraction must be in (0, 1]".into(),
        ));
    }
    Ok(())
}

pub(crate) use validate_risk as validate_risk_params;
