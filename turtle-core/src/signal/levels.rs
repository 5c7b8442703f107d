//! Entry-level ladder — the eight breakout prices of a flat period.
//!
//! Four long rungs above the entry channel high, four short rungs below the
//! entry channel low, spaced in half-ATR steps. Computed once per flat
//! period and frozen the instant a position opens.

use serde::{Deserialize, Serialize};

/// ATR multiples separating the ladder rungs from the channel edge.
pub const LADDER_STEPS: [f64; 4] = [0.0, 0.5, 1.0, 1.5];

/// The frozen entry prices for one flat-to-flat episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryLevels {
    pub long: [f64; 4],
    pub short: [f64; 4],
}

impl EntryLevels {
    /// Ladder off the entry channel: long rungs climb from `entry_up`,
    /// short rungs descend from `entry_down`.
    pub fn from_channel(entry_up: f64, entry_down: f64, atr: f64) -> Self {
        let mut long = [0.0; 4];
        let mut short = [0.0; 4];
        for (k, step) in LADDER_STEPS.iter().enumerate() {
            long[k] = entry_up + atr * step;
            short[k] = entry_down - atr * step;
        }
        Self { long, short }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_spacing_is_half_atr() {
        let levels = EntryLevels::from_channel(100.0, 90.0, 4.0);
        assert_eq!(levels.long, [100.0, 102.0, 104.0, 106.0]);
        assert_eq!(levels.short, [90.0, 88.0, 86.0, 84.0]);
    }

    #[test]
    fn zero_atr_collapses_ladder() {
        let levels = EntryLevels::from_channel(100.0, 90.0, 0.0);
        assert_eq!(levels.long, [100.0; 4]);
        assert_eq!(levels.short, [90.0; 4]);
    }
}
