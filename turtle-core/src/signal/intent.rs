//! Intent — a signal's trade instruction, in units, before arbitration.
//!
//! Intents are not orders. A signal emits what it *wants* at the price its
//! levels dictate; the portfolio decides whether the intent survives the
//! profit filter, caps, and trading lock, and only then sizes it into
//! broker contracts.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Offset};

/// One trade instruction from a signal: direction, open/close, the level
/// price (already clipped against the bar open), and volume in units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub direction: Direction,
    pub offset: Offset,
    pub price: f64,
    pub volume: u32,
}

impl Intent {
    pub fn open(direction: Direction, price: f64, volume: u32) -> Self {
        Self {
            direction,
            offset: Offset::Open,
            price,
            volume,
        }
    }

    pub fn close(direction: Direction, price: f64, volume: u32) -> Self {
        Self {
            direction,
            offset: Offset::Close,
            price,
            volume,
        }
    }

    pub fn is_open(&self) -> bool {
        self.offset == Offset::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_offset() {
        assert!(Intent::open(Direction::Long, 100.0, 1).is_open());
        assert!(!Intent::close(Direction::Short, 95.0, 2).is_open());
    }
}
