//! Arbitration — the explicit outcome of routing one intent.
//!
//! Dropped intents are control flow here, not errors: an intent that fails a
//! cap, the lock, or the profit filter simply never becomes an order. The
//! tri-state result makes that droppage observable and testable instead of
//! an implicit fall-through.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Offset, Order, SignalId, Symbol};

/// Why an intent was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Another signal owns this instrument's open episode.
    TradingLock,
    /// The signal's last closed trade was profitable and its filter is on.
    LastTradeProfitable,
    /// The portfolio-wide per-direction unit cap is saturated.
    DirectionCap,
    /// This instrument's per-product unit cap is saturated.
    ProductCap,
    /// A close arrived with no units held on the side being unwound.
    NoPosition,
    /// Flat-episode sizing failed: non-positive ATR, or a risk budget too
    /// small to express a single contract.
    ZeroVolatility,
}

/// Outcome of routing one intent through the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub enum Arbitration {
    /// Committed to the ledger; the sized order is ready for the sink.
    Accepted(Order),
    /// Dropped by policy, with the reason recorded.
    Rejected(RejectReason),
    /// The intent does not map to any actionable change (unknown
    /// instrument or zero volume); nothing was recorded.
    NotApplicable,
}

impl Arbitration {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Arbitration::Accepted(_))
    }
}

/// Diagnostic record of a dropped intent, kept by the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedIntent {
    pub signal: SignalId,
    pub symbol: Symbol,
    pub direction: Direction,
    pub offset: Offset,
    pub reason: RejectReason,
}
