//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! This engine averages TR with a plain mean over the window, so `atr(w)`
//! needs `w + 1` bars — every TR in the window has a real previous close.

use crate::domain::Bar;

use super::RollingSeries;

/// True range of `bar` against the previous bar's close.
pub fn true_range(bar: &Bar, prev_close: f64) -> f64 {
    (bar.high - bar.low)
        .max((bar.high - prev_close).abs())
        .max((bar.low - prev_close).abs())
}

/// Simple-average true range over the last `window` bars.
///
/// Returns `None` when fewer than `window + 1` bars are buffered or any
/// value in the window is NaN.
pub fn atr(series: &RollingSeries, window: usize) -> Option<f64> {
    assert!(window >= 1, "ATR window must be >= 1");
    let mut bars = series.tail(window + 1)?;

    // The oldest bar only supplies the first previous close.
    let mut prev_close = bars.next()?.close;
    let mut sum = 0.0;
    for bar in bars {
        let tr = true_range(bar, prev_close);
        if tr.is_nan() {
            return None;
        }
        sum += tr;
        prev_close = bar.close;
    }
    Some(sum / window as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_util::{make_ohlc_bars, primed_series};
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    const ROWS: [(f64, f64, f64, f64); 5] = [
        (100.0, 105.0, 95.0, 102.0),
        (102.0, 108.0, 100.0, 106.0), // TR = max(8, 6, 2) = 8
        (106.0, 107.0, 98.0, 99.0),   // TR = max(9, 1, 8) = 9
        (99.0, 103.0, 97.0, 101.0),   // TR = max(6, 4, 2) = 6
        (101.0, 106.0, 100.0, 105.0), // TR = max(6, 5, 1) = 6
    ];

    #[test]
    fn true_range_basic() {
        let bars = make_ohlc_bars(&ROWS);
        assert_approx(true_range(&bars[1], bars[0].close), 8.0, DEFAULT_EPSILON);
        assert_approx(true_range(&bars[2], bars[1].close), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current bar 115/108.
        let bars = make_ohlc_bars(&[(98.0, 102.0, 97.0, 100.0), (110.0, 115.0, 108.0, 112.0)]);
        assert_approx(true_range(&bars[1], bars[0].close), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_window_4() {
        let series = primed_series(&ROWS);
        // Mean of TR over the last 4 bars: (8 + 9 + 6 + 6) / 4.
        assert_approx(series.atr(4).unwrap(), 7.25, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_window_3() {
        let series = primed_series(&ROWS);
        // (9 + 6 + 6) / 3 = 7.
        assert_approx(series.atr(3).unwrap(), 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_needs_window_plus_one_bars() {
        let series = primed_series(&ROWS[..3]);
        assert!(series.atr(3).is_none());
        assert!(series.atr(2).is_some());
    }

    #[test]
    fn atr_nan_propagation() {
        let mut rows = ROWS;
        rows[2].1 = f64::NAN;
        let series = primed_series(&rows);
        assert!(series.atr(4).is_none());
    }
}
