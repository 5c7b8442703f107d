//! Volatility-based unit sizing.
//!
//! One unit is the number of contracts that puts a fixed fraction of
//! portfolio equity at risk per ATR of adverse movement:
//!
//! ```text
//! multiplier = round(portfolio_value × risk_fraction / (atr × contract_size))
//! ```
//!
//! A flat market (ATR ≤ 0) cannot be sized; rather than divide by zero or
//! floor the multiplier, sizing reports failure and the caller skips the
//! entry. The same applies when the budget rounds to zero contracts — a
//! zero multiplier would emit empty orders for the whole episode.

/// Fraction of equity one unit puts at risk per ATR of movement.
pub const RISK_FRACTION: f64 = 0.01;

/// Contracts per unit for a fresh episode, or `None` when the inputs are
/// degenerate (non-positive/non-finite ATR or contract size, or a budget
/// that rounds below one contract).
pub fn unit_multiplier(portfolio_value: f64, atr: f64, contract_size: f64) -> Option<i64> {
    if !atr.is_finite() || atr <= 0.0 || !contract_size.is_finite() || contract_size <= 0.0 {
        return None;
    }
    let multiplier = (portfolio_value * RISK_FRACTION / (atr * contract_size)).round();
    if !multiplier.is_finite() || multiplier < 1.0 {
        return None;
    }
    Some(multiplier as i64)
}
