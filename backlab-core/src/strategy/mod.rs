//! Strategy state machine — three interchangeable trend-following policies.
//!
//! A strategy is a pure function of (bar index, indicator values, current
//! position, current equity) to one action. Only three kinds exist and no
//! open extensibility is required, so dispatch is a tagged enum rather than
//! trait objects.
//!
//! Every variant recomputes its risk-based size fresh on each bar but only
//! acts on it at entry; while holding, position size stays fixed until exit.

pub mod donchian;
pub mod momentum;
pub mod sma_cross;

pub use donchian::DonchianBreakout;
pub use momentum::MomentumTf;
pub use sma_cross::SmaCross;

use crate::domain::{Bar, Position};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the strategy wants done on this bar. The broker executes it at the
/// bar's close price; partial fills do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hold,
    EnterLong(u64),
    Exit,
}

/// The closed set of strategy variants, each carrying its own parameters.
///
/// The serde tag matches the strategy kind names used at the request boundary
/// (`sma_cross`, `donchian_breakout`, `momentum`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    SmaCross(SmaCross),
    DonchianBreakout(DonchianBreakout),
    Momentum(MomentumTf),
}

/// Precomputed indicator series for one run, mirroring the strategy variants.
///
/// Built once by [`Strategy::indicators`] before the replay loop; never
/// mutated afterwards. Each series is bar-aligned with NaN warm-up.
#[derive(Debug, Clone)]
pub enum IndicatorSet {
    SmaCross {
        fast: Vec<f64>,
        slow: Vec<f64>,
        atr: Vec<f64>,
    },
    Donchian {
        entry_high: Vec<f64>,
        exit_low: Vec<f64>,
        atr: Vec<f64>,
    },
    Momentum {
        mom: Vec<f64>,
        atr: Vec<f64>,
    },
}

impl Strategy {
    /// Strategy of the given kind with the default parameters from the
    /// request schema.
    pub fn from_kind(kind: &str) -> Result<Self, EngineError> {
        match kind {
            "sma_cross" => Ok(Strategy::SmaCross(SmaCross::default())),
            "donchian_breakout" => Ok(Strategy::DonchianBreakout(DonchianBreakout::default())),
            "momentum" => Ok(Strategy::Momentum(MomentumTf::default())),
            other => Err(EngineError::InvalidStrategyKind(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::SmaCross(_) => "sma_cross",
            Strategy::DonchianBreakout(_) => "donchian_breakout",
            Strategy::Momentum(_) => "momentum",
        }
    }

    /// Reject non-positive windows and out-of-range risk parameters before
    /// the run starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            Strategy::SmaCross(p) => p.validate(),
            Strategy::DonchianBreakout(p) => p.validate(),
            Strategy::Momentum(p) => p.validate(),
        }
    }

    /// Precompute exactly the indicator series this variant consumes.
    pub fn indicators(&self, bars: &[Bar]) -> IndicatorSet {
        match self {
            Strategy::SmaCross(p) => p.indicators(bars),
            Strategy::DonchianBreakout(p) => p.indicators(bars),
            Strategy::Momentum(p) => p.indicators(bars),
        }
    }

    /// Decide the action for bar `i`.
    ///
    /// `equity` is the broker's valuation at this bar's close, used by the
    /// sizer at entry. NaN indicator values make every comparison false, so
    /// warm-up bars always hold.
    pub fn decide(
        &self,
        bars: &[Bar],
        i: usize,
        indicators: &IndicatorSet,
        position: Option<&Position>,
        equity: f64,
    ) -> Action {
        match (self, indicators) {
            (Strategy::SmaCross(p), IndicatorSet::SmaCross { fast, slow, atr }) => {
                p.decide(i, fast, slow, atr, position, equity)
            }
            (
                Strategy::DonchianBreakout(p),
                IndicatorSet::Donchian {
                    entry_high,
                    exit_low,
                    atr,
                },
            ) => p.decide(bars, i, entry_high, exit_low, atr, position, equity),
            (Strategy::Momentum(p), IndicatorSet::Momentum { mom, atr }) => {
                p.decide(i, mom, atr, position, equity)
            }
            // IndicatorSet is only ever built by `indicators()` on the same
            // strategy value; a mismatch is a defect in the runner.
            _ => unreachable!("indicator set does not match strategy variant"),
        }
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::from_kind(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kind_defaults() {
        assert!(matches!(
            Strategy::from_kind("sma_cross"),
            Ok(Strategy::SmaCross(_))
        ));
        assert!(matches!(
            Strategy::from_kind("donchian_breakout"),
            Ok(Strategy::DonchianBreakout(_))
        ));
        assert!(matches!(
            Strategy::from_kind("momentum"),
            Ok(Strategy::Momentum(_))
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            Strategy::from_kind("macd"),
            Err(EngineError::InvalidStrategyKind("macd".into()))
        );
    }

    #[test]
    fn kind_round_trips_through_from_kind() {
        for kind in ["sma_cross", "donchian_breakout", "momentum"] {
            assert_eq!(Strategy::from_kind(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn from_str_parses_like_from_kind() {
        for kind in ["sma_cross", "donchian_breakout", "momentum"] {
            assert_eq!(kind.parse::<Strategy>(), Strategy::from_kind(kind));
        }
        assert_eq!(
            "macd".parse::<Strategy>(),
            Err(EngineError::InvalidStrategyKind("macd".into()))
        );
    }

    #[test]
    fn serde_tag_matches_kind_names() {
        let json = serde_json::to_string(&Strategy::from_kind("momentum").unwrap()).unwrap();
        assert!(json.contains("\"kind\":\"momentum\""));
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), "momentum");
    }
}
