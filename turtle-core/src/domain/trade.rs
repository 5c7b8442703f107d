//! Trade — a completed round-trip, and the accumulator that builds one.
//!
//! Each signal tracks its own round trips: pyramided adds fold into a
//! volume-weighted average entry, and the full position closes in one shot.
//! The closed `Trade` answers "was the last completed trade profitable" for
//! signals that filter entries on prior-trade outcome.

use serde::{Deserialize, Serialize};

/// Accumulator for an open round trip.
///
/// `unit` is signed: positive while building a long, negative while building a
/// short. Adds must carry the same sign as the existing units — a round trip
/// never flips through zero, it closes and a new one starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    unit: i32,
    avg_entry: f64,
}

impl OpenPosition {
    /// Start a round trip with its first fill.
    pub fn new(price: f64, change: i32) -> Self {
        debug_assert!(change != 0);
        Self {
            unit: change,
            avg_entry: price,
        }
    }

    /// Fold one more fill into the weighted average entry.
    pub fn add(&mut self, price: f64, change: i32) {
        debug_assert!(change != 0 && change.signum() == self.unit.signum());
        let cost = self.unit as f64 * self.avg_entry + change as f64 * price;
        self.unit += change;
        self.avg_entry = cost / self.unit as f64;
    }

    /// Close the full position at `price`, producing the immutable record.
    pub fn close(self, price: f64) -> Trade {
        Trade {
            unit: self.unit,
            entry: self.avg_entry,
            exit: price,
            pnl: self.unit as f64 * (price - self.avg_entry),
        }
    }

    pub fn unit(&self) -> i32 {
        self.unit
    }

    pub fn avg_entry(&self) -> f64 {
        self.avg_entry
    }
}

/// A closed round trip: unit size at close, weighted average entry, exit,
/// realized P&L in price points per contract (`unit × (exit − entry)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub unit: i32,
    pub entry: f64,
    pub exit: f64,
    pub pnl: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
