//! Donchian channel breakout with ATR-risk sizing.
//!
//! - Enter long when the close breaks above the highest high of the *prior*
//!   `entry_window` bars (exclusive of the current bar — an inclusive window
//!   could never break out, since close <= high).
//! - Exit when the close breaks below the lowest low of the prior
//!   `exit_window` bars.
//! - Size = floor(equity * risk_perc / (atr_k * ATR)).

use crate::domain::{Bar, Position};
use crate::indicators;
use crate::sizing::risk_position_size;
use crate::strategy::sma_cross::validate_risk_params;
use crate::strategy::{Action, IndicatorSet};
use crate::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonchianBreakout {
    pub entry_window: usize,
    pub exit_window: usize,
    pub atr_window: usize,
    pub atr_k: f64,
    pub risk_perc: f64,
}

impl Default for DonchianBreakout {
    fn default() -> Self {
        Self {
            entry_window: 20,
            exit_window: 10,
            atr_window: 14,
            atr_k: 2.0,
            risk_perc: 0.01,
        }
    }
}

impl DonchianBreakout {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.entry_window == 0 || self.exit_window == 0 {
            return Err(EngineError::InvalidParameters(
                "Donchian windows must be > 0".into(),
            ));
        }
        validate_risk_params(self.atr_window, self.atr_k, self.risk_perc)
    }

    pub fn indicators(&self, bars: &[Bar]) -> IndicatorSet {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        IndicatorSet::Donchian {
            entry_high: indicators::highest(&highs, self.entry_window),
            exit_low: indicators::lowest(&lows, self.exit_window),
            atr: indicators::atr(bars, self.atr_window),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn decide(
        &self,
        bars: &[Bar],
        i: usize,
        entry_high: &[f64],
        exit_low: &[f64],
        atr: &[f64],
        position: Option<&Position>,
        equity: f64,
    ) -> Action {
        // Channel bounds are taken one bar back so the current bar's own
        // high/low cannot mask the breakout it is making.
        match position {
            None => {
                if i >= 1 && bars[i].close > entry_high[i - 1] {
                    let size = risk_position_size(equity, atr[i], self.atr_k, self.risk_perc);
                    if size > 0 {
                        return Action::EnterLong(size);
                    }
                }
                Action::Hold
            }
            Some(_) => {
                if i >= 1 && bars[i].close < exit_low[i - 1] {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }
}
