//! Rolling bar storage and windowed indicators.
//!
//! `RollingSeries` is the fixed-capacity ring buffer each signal feeds bars
//! into; the indicator functions compute over its most recent window. Every
//! windowed query returns `None` until enough history is buffered — callers
//! skip the bar instead of acting on undefined values.

pub mod atr;
pub mod donchian;
pub mod series;
pub mod sma;

pub use atr::{atr, true_range};
pub use donchian::donchian;
pub use series::RollingSeries;
pub use sma::sma;

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {expected}, got {actual}"
    );
}
