//! Portfolio — the single authority turning signal intents into sized orders.
//!
//! The portfolio is the only writer of ledger state. Per intent it runs the
//! arbitration gauntlet (trading lock, profit filter, caps, sizing), and on
//! acceptance atomically commits the ledger mutation and produces the sized
//! [`Order`]. Every drop is silent toward the signal — recorded for
//! diagnostics, never surfaced as an error.

pub mod arbitration;
pub mod sizing;

pub use arbitration::{Arbitration, RejectReason, RejectedIntent};
pub use sizing::{unit_multiplier, RISK_FRACTION};

use std::collections::HashMap;

use crate::domain::{Direction, Offset, Order, PositionLedger, SignalId, Symbol};
use crate::signal::Intent;

/// Pyramid cap per instrument, in units.
pub const MAX_PRODUCT_UNITS: i32 = 4;

/// Portfolio-wide cap per direction, in units.
pub const MAX_DIRECTION_UNITS: i32 = 10;

/// What the portfolio needs to know about the signal behind an intent:
/// identity for the lock, episode ATR for sizing, and the profit filter
/// inputs. Built by the engine right after the signal evaluates.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub signal: SignalId,
    pub symbol: &'a str,
    pub atr: f64,
    pub profit_check: bool,
    pub last_pnl: Option<f64>,
}

/// Aggregate position state plus the arbitration rules over it.
#[derive(Debug, Clone)]
pub struct Portfolio {
    value: f64,
    contract_sizes: HashMap<Symbol, f64>,
    ledger: PositionLedger,
    /// Which signal owns each instrument's open episode.
    lock: HashMap<Symbol, SignalId>,
    total_long: i32,
    total_short: i32,
    rejected: Vec<RejectedIntent>,
}

impl Portfolio {
    pub fn new(value: f64, contract_sizes: HashMap<Symbol, f64>) -> Self {
        Self {
            value,
            contract_sizes,
            ledger: PositionLedger::new(),
            lock: HashMap::new(),
            total_long: 0,
            total_short: 0,
            rejected: Vec::new(),
        }
    }

    /// Arbitrate one intent. Check order: lock, then offset-specific
    /// filtering, then sizing, then commit. First failure wins.
    pub fn route(&mut self, ctx: &SignalContext<'_>, intent: &Intent) -> Arbitration {
        let Some(&contract_size) = self.contract_sizes.get(ctx.symbol) else {
            tracing::debug!(symbol = ctx.symbol, "intent for untracked instrument");
            return Arbitration::NotApplicable;
        };
        if intent.volume == 0 {
            return Arbitration::NotApplicable;
        }

        if let Some(&owner) = self.lock.get(ctx.symbol) {
            if owner != ctx.signal {
                return self.reject(ctx, intent, RejectReason::TradingLock);
            }
        }

        match intent.offset {
            Offset::Open => self.route_open(ctx, intent, contract_size),
            Offset::Close => self.route_close(ctx, intent),
        }
    }

    fn route_open(
        &mut self,
        ctx: &SignalContext<'_>,
        intent: &Intent,
        contract_size: f64,
    ) -> Arbitration {
        // Skip the entry when the signal's last round trip won.
        if ctx.profit_check && ctx.last_pnl.is_some_and(|pnl| pnl > 0.0) {
            return self.reject(ctx, intent, RejectReason::LastTradeProfitable);
        }

        let unit = self.ledger.unit(ctx.symbol);
        match intent.direction {
            Direction::Long => {
                if self.total_long >= MAX_DIRECTION_UNITS {
                    return self.reject(ctx, intent, RejectReason::DirectionCap);
                }
                if unit >= MAX_PRODUCT_UNITS {
                    return self.reject(ctx, intent, RejectReason::ProductCap);
                }
            }
            Direction::Short => {
                if self.total_short >= MAX_DIRECTION_UNITS {
                    return self.reject(ctx, intent, RejectReason::DirectionCap);
                }
                if unit <= -MAX_PRODUCT_UNITS {
                    return self.reject(ctx, intent, RejectReason::ProductCap);
                }
            }
        }

        // A fresh episode sizes its multiplier off the signal's ATR and
        // freezes it until the instrument is flat again.
        if unit == 0 {
            let Some(multiplier) = unit_multiplier(self.value, ctx.atr, contract_size) else {
                return self.reject(ctx, intent, RejectReason::ZeroVolatility);
            };
            self.ledger.set_multiplier(ctx.symbol, multiplier);
        }

        self.ledger
            .apply_open(ctx.symbol, intent.direction, intent.price, intent.volume as i32);
        if unit == 0 {
            self.lock.insert(ctx.symbol.to_string(), ctx.signal);
        }
        self.commit(ctx, intent, intent.volume)
    }

    fn route_close(&mut self, ctx: &SignalContext<'_>, intent: &Intent) -> Arbitration {
        let unit = self.ledger.unit(ctx.symbol);
        // The close direction is the closing trade's direction: a Short
        // close unwinds long units, a Long close unwinds short units.
        let held = match intent.direction {
            Direction::Short => unit.max(0),
            Direction::Long => (-unit).max(0),
        };
        if held == 0 {
            return self.reject(ctx, intent, RejectReason::NoPosition);
        }

        // Never over-close: clamp to what is actually held.
        let volume = (intent.volume as i32).min(held);
        self.ledger
            .apply_close(ctx.symbol, intent.direction, intent.price, volume);
        if self.ledger.unit(ctx.symbol) == 0 {
            self.lock.remove(ctx.symbol);
        }
        self.commit(ctx, intent, volume as u32)
    }

    fn commit(&mut self, ctx: &SignalContext<'_>, intent: &Intent, volume: u32) -> Arbitration {
        // Totals are recomputed from scratch after every commit; immune to
        // incremental drift.
        self.total_long = self.ledger.total_long();
        self.total_short = self.ledger.total_short();

        let quantity = volume as i64 * self.ledger.multiplier(ctx.symbol);
        Arbitration::Accepted(Order {
            symbol: ctx.symbol.to_string(),
            direction: intent.direction,
            offset: intent.offset,
            price: intent.price,
            quantity,
        })
    }

    fn reject(
        &mut self,
        ctx: &SignalContext<'_>,
        intent: &Intent,
        reason: RejectReason,
    ) -> Arbitration {
        tracing::debug!(signal = %ctx.signal, symbol = ctx.symbol, ?reason, "intent dropped");
        self.rejected.push(RejectedIntent {
            signal: ctx.signal,
            symbol: ctx.symbol.to_string(),
            direction: intent.direction,
            offset: intent.offset,
            reason,
        });
        Arbitration::Rejected(reason)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    /// Signed unit count for `symbol`.
    pub fn unit(&self, symbol: &str) -> i32 {
        self.ledger.unit(symbol)
    }

    /// Broker contract position for `symbol`.
    pub fn pos(&self, symbol: &str) -> i64 {
        self.ledger.pos(symbol)
    }

    pub fn total_long(&self) -> i32 {
        self.total_long
    }

    pub fn total_short(&self) -> i32 {
        self.total_short
    }

    /// The signal owning `symbol`'s open episode, if any.
    pub fn lock_owner(&self, symbol: &str) -> Option<SignalId> {
        self.lock.get(symbol).copied()
    }

    /// Accumulated dropped intents across the run.
    pub fn rejected_intents(&self) -> &[RejectedIntent] {
        &self.rejected
    }
}
