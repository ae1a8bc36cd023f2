//! Indicator library — pure rolling statistics over a bar series.
//!
//! Every function returns a `Vec<f64>` aligned 1:1 with its input. `f64::NAN`
//! is the "undefined" sentinel for the warm-up window and must never be
//! silently coerced to zero; strategies treat NaN comparisons as false, which
//! makes warm-up bars decision-free by construction.
//!
//! All windows are strict trailing windows with no look-ahead.

pub mod atr;
pub mod momentum;
pub mod rolling;
pub mod sma;

pub use atr::{atr, true_range};
pub use momentum::momentum;
pub use rolling::{highest, lowest};
pub use sma::sma;

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual}"
    );
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}
