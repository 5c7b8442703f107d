//! Turtle Core — multi-instrument, multi-timeframe trend-following decision
//! engine.
//!
//! Given a stream of price bars per instrument, the engine produces sized
//! entry/exit orders: Donchian-channel breakout entries pyramided in
//! half-ATR steps, channel/stop exits, volatility-based risk budgeting, and
//! layered exposure caps.
//!
//! - Rolling bar series and windowed indicators (Donchian, ATR, SMA)
//! - Signal state machines with frozen entry ladders and per-fill stops
//! - Per-instrument position ledger with weighted-average entry accounting
//! - Portfolio arbitration: trading lock, prior-winner filter, unit caps,
//!   risk-budget sizing
//! - Deterministic single-threaded bar driver with config fingerprinting
//!
//! Data flow: bar → series update → signal evaluation → intent → portfolio
//! arbitration → ledger commit → order → [`sink::ExecutionSink`].

pub mod config;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod portfolio;
pub mod signal;
pub mod sink;

pub use config::{ConfigError, EngineConfig, InstrumentConfig};
pub use engine::TurtleEngine;
pub use signal::{Intent, SignalParams, TurtleSignal};
pub use sink::{ExecutionSink, NoOpSink, RecordingSink};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync, so a host can move
    /// the engine onto a worker thread without retrofitting.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Order>();
        require_sync::<domain::Order>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::PositionLedger>();
        require_sync::<domain::PositionLedger>();

        require_send::<signal::Intent>();
        require_sync::<signal::Intent>();
        require_send::<signal::TurtleSignal>();
        require_sync::<signal::TurtleSignal>();

        require_send::<portfolio::Portfolio>();
        require_sync::<portfolio::Portfolio>();
        require_send::<portfolio::Arbitration>();
        require_sync::<portfolio::Arbitration>();

        require_send::<config::EngineConfig>();
        require_sync::<config::EngineConfig>();
        require_send::<fingerprint::ConfigHash>();
        require_sync::<fingerprint::ConfigHash>();

        require_send::<TurtleEngine<NoOpSink>>();
        require_send::<TurtleEngine<RecordingSink>>();
    }
}
