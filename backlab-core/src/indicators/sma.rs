//! Simple Moving Average (SMA).
//!
//! Rolling mean over a trailing window. Undefined (NaN) for the first
//! `window - 1` values.

/// Arithmetic mean of the trailing `window` values.
///
/// Inputs are assumed finite (the bar contract); the window is rolled with an
/// incremental sum.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "SMA window must be >= 1");

    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < window {
        return result;
    }

    let mut sum: f64 = values.iter().take(window).sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = sum / window as f64;
    }

    result
}
