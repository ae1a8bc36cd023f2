//! Lookback return (momentum).
//!
//! `momentum[i] = closes[i] / closes[i - lookback] - 1`.
//! Undefined (NaN) for the first `lookback` values.

/// Fractional return over a trailing `lookback` period.
///
/// A zero base price would produce an infinite return; that degenerate value
/// is reported as NaN so it stays in the "undefined" regime instead of
/// triggering an entry.
pub fn momentum(closes: &[f64], lookback: usize) -> Vec<f64> {
    assert!(lookback >= 1, "momentum lookback must be >= 1");

    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    for i in lookback..n {
        let base = closes[i - lookback];
        if base != 0.0 {
            result[i] = closes[i] / base - 1.0;
        }
    }

    result
}
