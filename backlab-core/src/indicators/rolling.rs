//! Rolling extremes — highest/lowest over a trailing window.
//!
//! The Donchian-style channel bounds. Undefined (NaN) for the first
//! `window - 1` values.

/// Rolling maximum over the trailing `window` values.
pub fn highest(values: &[f64], window: usize) -> Vec<f64> {
    rolling_extreme(values, window, f64::max)
}

/// Rolling minimum over the trailing `window` values.
pub fn lowest(values: &[f64], window: usize) -> Vec<f64> {
    rolling_extreme(values, window, f64::min)
}

fn rolling_extreme(values: &[f64], window: usize, pick: fn(f64, f64) -> f64) -> Vec<f64> {
    assert!(window >= 1, "rolling window must be >= 1");

    let n = values.len();
    let mut result = vec![f64::NAN; n];

    // Daily windows are small (10-50 bars); a plain scan per bar is fine.
    for i in (window - 1)..n {
        let mut extreme = values[i + 1 - window];
        for &v in &values[(i + 2 - window)..=i] {
            extreme = pick(extreme, v);
        }
        result[i] = extreme;
    }

    result
}
