//! Donchian Channel — highest high / lowest low over a lookback window.

use super::RollingSeries;

/// (max high, min low) over the last `window` bars.
///
/// Returns `None` when fewer than `window` bars are buffered or any bar in
/// the window carries a NaN high/low.
pub fn donchian(series: &RollingSeries, window: usize) -> Option<(f64, f64)> {
    assert!(window >= 1, "Donchian window must be >= 1");
    let bars = series.tail(window)?;

    let mut up = f64::NEG_INFINITY;
    let mut down = f64::INFINITY;
    for bar in bars {
        if bar.high.is_nan() || bar.low.is_nan() {
            return None;
        }
        if bar.high > up {
            up = bar.high;
        }
        if bar.low < down {
            down = bar.low;
        }
    }
    Some((up, down))
}
