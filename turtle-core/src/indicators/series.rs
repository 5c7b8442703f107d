//! RollingSeries — fixed-capacity ring buffer of bars for one instrument.

use std::collections::VecDeque;

use crate::domain::Bar;

/// The most recent bars of one instrument, oldest evicted on overflow.
///
/// A series is *primed* once the buffer has filled to capacity. Before that,
/// windowed queries may already succeed (the window fits), but signals wait
/// for priming so every indicator they use is defined on the same history.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    bars: VecDeque<Bar>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "series capacity must be >= 1");
        Self {
            bars: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append one bar, evicting the oldest if at capacity. O(1) amortized.
    pub fn update(&mut self, bar: Bar) {
        self.bars.push_back(bar);
        if self.bars.len() > self.capacity {
            self.bars.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the buffer has filled to capacity.
    pub fn is_primed(&self) -> bool {
        self.bars.len() == self.capacity
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// The most recent `n` bars in chronological order, or `None` if fewer
    /// than `n` are buffered.
    pub fn tail(&self, n: usize) -> Option<impl Iterator<Item = &Bar>> {
        if n == 0 || n > self.bars.len() {
            return None;
        }
        Some(self.bars.range(self.bars.len() - n..))
    }

    /// (max high, min low) over the last `window` bars.
    pub fn donchian(&self, window: usize) -> Option<(f64, f64)> {
        super::donchian(self, window)
    }

    /// Simple-average true range over the last `window` bars.
    pub fn atr(&self, window: usize) -> Option<f64> {
        super::atr(self, window)
    }

    /// Simple moving average of close over the last `window` bars.
    pub fn sma(&self, window: usize) -> Option<f64> {
        super::sma(self, window)
    }
}
