//! TurtleEngine — the deterministic bar-by-bar driver.
//!
//! Single-threaded, single-writer: one bar is fully processed (series
//! update → every resident signal in registration order → arbitration →
//! ledger commit → sink forwarding) before the next bar is considered.
//! Replaying the same bar stream through a freshly built engine reproduces
//! the same order stream bit for bit.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::config::{ConfigError, EngineConfig};
use crate::domain::{Bar, SignalId, Symbol};
use crate::fingerprint::{config_hash, ConfigHash};
use crate::portfolio::{Arbitration, Portfolio, SignalContext};
use crate::signal::TurtleSignal;
use crate::sink::ExecutionSink;

pub struct TurtleEngine<S: ExecutionSink> {
    /// All signals across all instruments, in registration order.
    signals: Vec<TurtleSignal>,
    /// Registration indices per instrument, ascending.
    by_symbol: HashMap<Symbol, Vec<usize>>,
    portfolio: Portfolio,
    sink: S,
    last_seen: HashMap<Symbol, NaiveDateTime>,
    fingerprint: ConfigHash,
    bars_processed: u64,
}

impl<S: ExecutionSink> TurtleEngine<S> {
    /// Build an engine from validated configuration. Malformed input is the
    /// only fatal error this crate has; nothing fails after construction.
    pub fn new(config: EngineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let fingerprint = config_hash(&config);

        let mut signals = Vec::new();
        let mut by_symbol: HashMap<Symbol, Vec<usize>> = HashMap::new();
        let mut contract_sizes = HashMap::new();
        for instrument in &config.instruments {
            contract_sizes.insert(instrument.symbol.clone(), instrument.contract_size);
            for params in &instrument.signals {
                by_symbol
                    .entry(instrument.symbol.clone())
                    .or_default()
                    .push(signals.len());
                signals.push(TurtleSignal::new(
                    SignalId(signals.len()),
                    instrument.symbol.clone(),
                    *params,
                    config.series_capacity,
                ));
            }
        }
        tracing::debug!(
            signals = signals.len(),
            instruments = config.instruments.len(),
            fingerprint = %fingerprint,
            "engine constructed"
        );

        Ok(Self {
            signals,
            by_symbol,
            portfolio: Portfolio::new(config.portfolio_value, contract_sizes),
            sink,
            last_seen: HashMap::new(),
            fingerprint,
            bars_processed: 0,
        })
    }

    /// Process one bar to completion.
    ///
    /// Each signal's intents are arbitrated immediately after it evaluates,
    /// before the next signal sees the bar — the trading lock therefore
    /// resolves same-bar races in registration order. Bars older than the
    /// instrument's last seen timestamp are dropped; gaps are tolerated
    /// (this engine does no gap detection).
    pub fn on_bar(&mut self, bar: &Bar) {
        if let Some(&last) = self.last_seen.get(&bar.symbol) {
            if bar.timestamp < last {
                tracing::warn!(
                    symbol = %bar.symbol,
                    at = %bar.timestamp,
                    last = %last,
                    "out-of-order bar dropped"
                );
                return;
            }
        }
        let Some(indices) = self.by_symbol.get(&bar.symbol) else {
            tracing::debug!(symbol = %bar.symbol, "bar for unconfigured instrument ignored");
            return;
        };
        let indices = indices.clone();

        self.last_seen.insert(bar.symbol.clone(), bar.timestamp);
        self.bars_processed += 1;

        for i in indices {
            let intents = self.signals[i].on_bar(bar);
            if intents.is_empty() {
                continue;
            }
            let signal = &self.signals[i];
            let ctx = SignalContext {
                signal: signal.id(),
                symbol: signal.symbol(),
                atr: signal.atr(),
                profit_check: signal.params().profit_check,
                last_pnl: signal.last_pnl(),
            };
            for intent in &intents {
                if let Arbitration::Accepted(order) = self.portfolio.route(&ctx, intent) {
                    self.sink.on_order(&order);
                }
            }
        }
    }

    /// Drive a whole bar stream through [`Self::on_bar`].
    pub fn run<I: IntoIterator<Item = Bar>>(&mut self, bars: I) {
        for bar in bars {
            self.on_bar(&bar);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn signals(&self) -> &[TurtleSignal] {
        &self.signals
    }

    /// Identity of this engine's configuration; equal fingerprints plus
    /// equal bar streams yield equal order streams.
    pub fn fingerprint(&self) -> &ConfigHash {
        &self.fingerprint
    }

    pub fn bars_processed(&self) -> u64 {
        self.bars_processed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
