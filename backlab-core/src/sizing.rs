//! Risk-based position sizing.
//!
//! Classic risk management: risk a fixed fraction of current equity per trade,
//! with the stop placed `atr_k` ATRs away from entry.
//!
//! ```text
//! risk_dollars  = equity * risk_perc
//! stop_distance = atr_k * ATR
//! size          = floor(risk_dollars / stop_distance)
//! ```

/// Floor applied to ATR before dividing. Guards against an exactly-zero ATR
/// (a run of identical bars) producing a division by zero.
const MIN_ATR: f64 = 1e-6;

/// Whole-share position size for a new entry.
///
/// An undefined (NaN) ATR means the indicator is still warming up; that
/// short-circuits to size 0 — no entry — rather than falling through to the
/// `MIN_ATR` clamp and sizing off a bogus stop distance.
pub fn risk_position_size(equity: f64, atr_value: f64, atr_k: f64, risk_perc: f64) -> u64 {
    if atr_value.is_nan() || equity <= 0.0 {
        return 0;
    }

    let stop_distance = atr_k * atr_value.max(MIN_ATR);
    if stop_distance <= 0.0 {
        return 0;
    }

    let size = (equity * risk_perc / stop_distance).floor();
    if size.is_finite() && size > 0.0 {
        size as u64
    } else {
        0
    }
}
