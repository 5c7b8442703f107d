//! ExecutionSink — the engine's entire outbound surface.
//!
//! Whatever consumes finalized orders (a backtest fill engine, a live broker
//! adapter) implements this one callback. Delivery is fire-and-forget: the
//! ledger committed before the order was forwarded, and nothing the sink
//! does feeds back into engine state.

use crate::domain::Order;

pub trait ExecutionSink: Send {
    fn on_order(&mut self, order: &Order);
}

/// Discards every order. Useful when only end-state matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl ExecutionSink for NoOpSink {
    fn on_order(&mut self, _order: &Order) {}
}

/// Buffers every order in emission order. The standard test double.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub orders: Vec<Order>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl ExecutionSink for RecordingSink {
    fn on_order(&mut self, order: &Order) {
        self.orders.push(order.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Offset};

    #[test]
    fn recording_sink_preserves_emission_order() {
        let mut sink = RecordingSink::new();
        for quantity in [200, 400] {
            sink.on_order(&Order {
                symbol: "cu".into(),
                direction: Direction::Long,
                offset: Offset::Open,
                price: 100.0,
                quantity,
            });
        }
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.orders[0].quantity, 200);
        assert_eq!(sink.orders[1].quantity, 400);
    }
}
