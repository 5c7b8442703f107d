//! Orders — sized instructions forwarded to the execution sink.

use serde::{Deserialize, Serialize};

/// Trade direction of an order or intent.
///
/// Note that direction is the direction of the *order*, not of the position it
/// affects: closing a long position is a `Short` order with `Offset::Close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    /// +1 for Long, -1 for Short.
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Long => 1,
            Direction::Short => -1,
        }
    }
}

/// Whether an order opens new exposure or unwinds existing exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Offset {
    Open,
    Close,
}

/// A sized order: the outbound unit of the engine.
///
/// `quantity` is in broker contracts (signal units × episode multiplier).
/// Fire-and-forget: the sink's success or failure does not feed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: String,
    pub direction: Direction,
    pub offset: Offset,
    pub price: f64,
    pub quantity: i64,
}
