//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the arithmetic mean of the trailing `window` true-range values.
//! Lookback: `window` (the first bar has no previous close, so TR starts at
//! index 1 and ATR is first defined at index `window`).

use crate::domain::Bar;

/// True Range series. TR[0] is NaN — there is no previous close to gap against.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

/// Mean of the trailing `window` true-range values.
///
/// Undefined (NaN) for the first `window` bars: the earliest full TR window
/// ends at index `window` because TR itself starts at index 1.
pub fn atr(bars: &[Bar], window: usize) -> Vec<f64> {
    assert!(window >= 1, "ATR window must be >= 1");

    let tr = true_range(bars);
    let n = tr.len();
    let mut result = vec![f64::NAN; n];
    if n <= window {
        return result;
    }

    let mut sum: f64 = tr[1..=window].iter().sum();
    result[window] = sum / window as f64;

    for i in (window + 1)..n {
        sum += tr[i] - tr[i - window];
        result[i] = sum / window as f64;
    }

    result
}
