use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a signal within one engine: its registration index.
///
/// Registration order is the arbitration order — when two signals on the same
/// instrument act on the same bar, the lower id is routed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignalId(pub usize);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signal#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_id_orders_by_registration() {
        assert!(SignalId(0) < SignalId(1));
    }

    #[test]
    fn signal_id_display() {
        assert_eq!(SignalId(3).to_string(), "signal#3");
    }
}
