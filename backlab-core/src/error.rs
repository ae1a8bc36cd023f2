//! Engine errors — the input-error taxonomy surfaced to the caller.
//!
//! Everything else that can go wrong numerically during a run (indicator
//! warm-up, zero ATR, zero-variance returns) is absorbed by policy and shows
//! up as a skipped entry or a null metric, never as an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The bar series for the requested period is empty. Reported before the
    /// replay loop starts; no partial ledgers are produced.
    #[error("no data for the requested period")]
    NoDataForPeriod,

    /// The request layer named a strategy kind the engine does not know.
    #[error("unknown strategy kind: {0}")]
    InvalidStrategyKind(String),

    /// Parameter validation failed (non-positive window, bad risk fraction, ...).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EngineError::NoDataForPeriod.to_string(),
            "no data for the requested period"
        );
        assert_eq!(
            EngineError::InvalidStrategyKind("macd".into()).to_string(),
            "unknown strategy kind: macd"
        );
        assert_eq!(
            EngineError::InvalidParameters("fast window must be > 0".into()).to_string(),
            "invalid parameters: fast window must be > 0"
        );
    }
}
