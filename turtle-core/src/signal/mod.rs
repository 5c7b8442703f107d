//! Signal — one directional trend-following state machine per
//! (instrument, parameter set) pair.
//!
//! A signal owns its rolling series and its private position state: the
//! signed unit count, the frozen entry ladder, the two stop prices, and the
//! closed-trade history. Per bar it checks exits first, then entry rungs,
//! and finally refreshes its channels — so every decision on bar *t* uses
//! levels computed no later than bar *t − 1*.
//!
//! Signals are portfolio-agnostic. They emit [`Intent`]s and commit their own
//! state immediately, whether or not the portfolio later accepts the intent;
//! a rejected entry keeps trading hypothetically, which is what makes the
//! prior-winner entry filter work.

pub mod intent;
pub mod levels;

pub use intent::Intent;
pub use levels::{EntryLevels, LADDER_STEPS};

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Direction, OpenPosition, SignalId, Symbol, Trade};
use crate::indicators::RollingSeries;

/// Stop distance in ATR multiples, measured from the latest fill.
const STOP_ATR_MULTIPLE: f64 = 2.0;

/// Parameter set of one signal: channel windows and the entry filter flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalParams {
    pub entry_window: usize,
    pub exit_window: usize,
    pub atr_window: usize,
    #[serde(default)]
    pub profit_check: bool,
}

impl SignalParams {
    pub fn new(
        entry_window: usize,
        exit_window: usize,
        atr_window: usize,
        profit_check: bool,
    ) -> Self {
        Self {
            entry_window,
            exit_window,
            atr_window,
            profit_check,
        }
    }

    /// The classic fast system: 20-bar entry, 10-bar exit, prior-winner
    /// filter on.
    pub fn system_one() -> Self {
        Self::new(20, 10, 20, true)
    }

    /// The classic slow system: 55-bar entry, 20-bar exit, no filter.
    pub fn system_two() -> Self {
        Self::new(55, 20, 20, false)
    }

    /// Smallest series capacity this parameter set can run on.
    /// ATR needs one extra bar for its first previous close.
    pub fn required_capacity(&self) -> usize {
        self.entry_window.max(self.exit_window).max(self.atr_window + 1)
    }
}

/// One turtle state machine bound to one instrument.
#[derive(Debug, Clone)]
pub struct TurtleSignal {
    id: SignalId,
    symbol: Symbol,
    params: SignalParams,
    series: RollingSeries,

    unit: i32,
    /// Episode ATR: refreshed while flat, frozen while a position is open.
    atr: f64,
    entry_up: f64,
    entry_down: f64,
    exit_up: f64,
    exit_down: f64,
    /// Unset until the first refresh after priming; frozen while non-flat.
    levels: Option<EntryLevels>,
    long_stop: f64,
    short_stop: f64,

    open_position: Option<OpenPosition>,
    trades: Vec<Trade>,
}

impl TurtleSignal {
    pub fn new(id: SignalId, symbol: impl Into<Symbol>, params: SignalParams, capacity: usize) -> Self {
        assert!(
            capacity >= params.required_capacity(),
            "series capacity {capacity} too small for signal windows"
        );
        Self {
            id,
            symbol: symbol.into(),
            params,
            series: RollingSeries::new(capacity),
            unit: 0,
            atr: 0.0,
            entry_up: 0.0,
            entry_down: 0.0,
            exit_up: 0.0,
            exit_down: 0.0,
            levels: None,
            long_stop: 0.0,
            short_stop: 0.0,
            open_position: None,
            trades: Vec::new(),
        }
    }

    /// Feed one bar: update the series, evaluate the state machine against
    /// the previous bar's levels, then refresh channels (and the frozen
    /// ladder if flat). Returns the intents this bar produced.
    pub fn on_bar(&mut self, bar: &Bar) -> Vec<Intent> {
        debug_assert_eq!(bar.symbol, self.symbol);
        self.series.update(bar.clone());
        if !self.series.is_primed() {
            return Vec::new();
        }
        let intents = self.generate(bar);
        self.refresh_indicators();
        intents
    }

    /// The state machine proper. Exit checks run first and preempt entries;
    /// a bar never produces both.
    fn generate(&mut self, bar: &Bar) -> Vec<Intent> {
        let mut out = Vec::new();
        let Some(levels) = self.levels else {
            return out;
        };

        if self.unit > 0 {
            let trigger = self.long_stop.max(self.exit_down);
            if bar.low <= trigger {
                self.sell(trigger, bar.open, &mut out);
                return out;
            }
        } else if self.unit < 0 {
            let trigger = self.short_stop.min(self.exit_up);
            if bar.high >= trigger {
                self.cover(trigger, bar.open, &mut out);
                return out;
            }
        }

        if self.unit >= 0 {
            let mut traded = false;
            for (k, &level) in levels.long.iter().enumerate() {
                if bar.high >= level && self.unit < k as i32 + 1 {
                    self.buy(level, 1, bar.open, &mut out);
                    traded = true;
                }
            }
            // A long fill ends entry processing for the bar.
            if traded {
                return out;
            }
        }

        if self.unit <= 0 {
            for (k, &level) in levels.short.iter().enumerate() {
                if bar.low <= level && self.unit > -(k as i32 + 1) {
                    self.short(level, 1, bar.open, &mut out);
                }
            }
        }

        out
    }

    /// Channels refresh every bar; ATR, ladder, and stops only while flat.
    fn refresh_indicators(&mut self) {
        let Some((entry_up, entry_down)) = self.series.donchian(self.params.entry_window) else {
            return;
        };
        let Some((exit_up, exit_down)) = self.series.donchian(self.params.exit_window) else {
            return;
        };
        self.entry_up = entry_up;
        self.entry_down = entry_down;
        self.exit_up = exit_up;
        self.exit_down = exit_down;

        if self.unit == 0 {
            let Some(atr) = self.series.atr(self.params.atr_window) else {
                return;
            };
            self.atr = atr;
            self.levels = Some(EntryLevels::from_channel(entry_up, entry_down, atr));
            self.long_stop = 0.0;
            self.short_stop = 0.0;
        }
    }

    /// Buy one rung. Stop orders never fill better than the bar open.
    fn buy(&mut self, level: f64, volume: u32, bar_open: f64, out: &mut Vec<Intent>) {
        let price = bar_open.max(level);
        self.add_units(price, volume as i32);
        out.push(Intent::open(Direction::Long, price, volume));
        self.long_stop = price - STOP_ATR_MULTIPLE * self.atr;
    }

    fn short(&mut self, level: f64, volume: u32, bar_open: f64, out: &mut Vec<Intent>) {
        let price = bar_open.min(level);
        self.add_units(price, -(volume as i32));
        out.push(Intent::open(Direction::Short, price, volume));
        self.short_stop = price + STOP_ATR_MULTIPLE * self.atr;
    }

    /// Close the whole long position at the triggered exit.
    fn sell(&mut self, trigger: f64, bar_open: f64, out: &mut Vec<Intent>) {
        let price = bar_open.min(trigger);
        let volume = self.unit.unsigned_abs();
        self.close_position(price);
        out.push(Intent::close(Direction::Short, price, volume));
    }

    /// Close the whole short position at the triggered exit.
    fn cover(&mut self, trigger: f64, bar_open: f64, out: &mut Vec<Intent>) {
        let price = bar_open.max(trigger);
        let volume = self.unit.unsigned_abs();
        self.close_position(price);
        out.push(Intent::close(Direction::Long, price, volume));
    }

    fn add_units(&mut self, price: f64, change: i32) {
        match &mut self.open_position {
            Some(pos) => pos.add(price, change),
            None => self.open_position = Some(OpenPosition::new(price, change)),
        }
        self.unit += change;
    }

    fn close_position(&mut self, price: f64) {
        if let Some(pos) = self.open_position.take() {
            self.trades.push(pos.close(price));
        }
        self.unit = 0;
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn id(&self) -> SignalId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn params(&self) -> &SignalParams {
        &self.params
    }

    pub fn unit(&self) -> i32 {
        self.unit
    }

    /// The episode ATR used for stops and sizing.
    pub fn atr(&self) -> f64 {
        self.atr
    }

    pub fn entry_channel(&self) -> (f64, f64) {
        (self.entry_up, self.entry_down)
    }

    pub fn exit_channel(&self) -> (f64, f64) {
        (self.exit_up, self.exit_down)
    }

    pub fn entry_levels(&self) -> Option<&EntryLevels> {
        self.levels.as_ref()
    }

    pub fn long_stop(&self) -> f64 {
        self.long_stop
    }

    pub fn short_stop(&self) -> f64 {
        self.short_stop
    }

    pub fn is_primed(&self) -> bool {
        self.series.is_primed()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// P&L of the most recent closed trade, if any. Drives the
    /// prior-winner entry filter.
    pub fn last_pnl(&self) -> Option<f64> {
        self.trades.last().map(|t| t.pnl)
    }
}
