//! Simple moving average of close.

use super::RollingSeries;

/// Mean close over the last `window` bars, or `None` if not enough history
/// or any close in the window is NaN.
pub fn sma(series: &RollingSeries, window: usize) -> Option<f64> {
    assert!(window >= 1, "SMA window must be >= 1");
    let bars = series.tail(window)?;

    let mut sum = 0.0;
    for bar in bars {
        if bar.close.is_nan() {
            return None;
        }
        sum += bar.close;
    }
    Some(sum / window as f64)
}
