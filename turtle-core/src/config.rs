//! Engine configuration — validated once, fatal on malformed input.
//!
//! Configuration arrives at construction (directly or as TOML) and is the
//! only place the engine can fail hard: a negative window or an unknown
//! instrument must stop the engine before the first bar, never mid-run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::signal::SignalParams;

/// Default ring-buffer capacity per signal, in bars.
pub const DEFAULT_SERIES_CAPACITY: usize = 60;

fn default_series_capacity() -> usize {
    DEFAULT_SERIES_CAPACITY
}

/// Complete construction-time input: equity, per-instrument contract sizes,
/// and the signal parameter sets to instantiate per instrument.
///
/// Instrument and signal order is meaningful — it is the registration order,
/// which fixes arbitration priority and the run fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Starting portfolio equity, in account currency.
    pub portfolio_value: f64,
    /// Ring-buffer capacity for every signal's series.
    #[serde(default = "default_series_capacity")]
    pub series_capacity: usize,
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: String,
    /// Currency value of one point of price movement per contract.
    pub contract_size: f64,
    pub signals: Vec<SignalParams>,
}

impl InstrumentConfig {
    /// The reference two-system setup: fast (20/10) with the prior-winner
    /// filter, slow (55/20) without.
    pub fn reference(symbol: impl Into<String>, contract_size: f64) -> Self {
        Self {
            symbol: symbol.into(),
            contract_size,
            signals: vec![SignalParams::system_one(), SignalParams::system_two()],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("portfolio value must be positive, got {0}")]
    NonPositivePortfolioValue(f64),

    #[error("no instruments configured")]
    NoInstruments,

    #[error("duplicate instrument symbol {0:?}")]
    DuplicateSymbol(String),

    #[error("instrument {symbol:?}: contract size must be positive, got {contract_size}")]
    NonPositiveContractSize { symbol: String, contract_size: f64 },

    #[error("instrument {symbol:?} has no signals")]
    NoSignals { symbol: String },

    #[error("instrument {symbol:?}: {window} window must be >= 1")]
    ZeroWindow { symbol: String, window: &'static str },

    #[error(
        "instrument {symbol:?}: series capacity {capacity} below the {required} bars its signals need"
    )]
    CapacityTooSmall {
        symbol: String,
        capacity: usize,
        required: usize,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    pub fn new(portfolio_value: f64, instruments: Vec<InstrumentConfig>) -> Self {
        Self {
            portfolio_value,
            series_capacity: DEFAULT_SERIES_CAPACITY,
            instruments,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed input before the engine starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.portfolio_value.is_finite() || self.portfolio_value <= 0.0 {
            return Err(ConfigError::NonPositivePortfolioValue(self.portfolio_value));
        }
        if self.instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(instrument.symbol.clone()));
            }
            if !instrument.contract_size.is_finite() || instrument.contract_size <= 0.0 {
                return Err(ConfigError::NonPositiveContractSize {
                    symbol: instrument.symbol.clone(),
                    contract_size: instrument.contract_size,
                });
            }
            if instrument.signals.is_empty() {
                return Err(ConfigError::NoSignals {
                    symbol: instrument.symbol.clone(),
                });
            }
            for params in &instrument.signals {
                for (window, name) in [
                    (params.entry_window, "entry"),
                    (params.exit_window, "exit"),
                    (params.atr_window, "atr"),
                ] {
                    if window == 0 {
                        return Err(ConfigError::ZeroWindow {
                            symbol: instrument.symbol.clone(),
                            window: name,
                        });
                    }
                }
                let required = params.required_capacity();
                if self.series_capacity < required {
                    return Err(ConfigError::CapacityTooSmall {
                        symbol: instrument.symbol.clone(),
                        capacity: self.series_capacity,
                        required,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_config() -> EngineConfig {
        EngineConfig::new(10_000_000.0, vec![InstrumentConfig::reference("cu", 10.0)])
    }

    #[test]
    fn reference_config_is_valid() {
        assert!(reference_config().validate().is_ok());
    }

    #[test]
    fn toml_roundtrip() {
        let text = r#"
            portfolio_value = 1000000.0
            series_capacity = 60

            [[instruments]]
            symbol = "cu"
            contract_size = 10.0
            signals = [
                { entry_window = 20, exit_window = 10, atr_window = 20, profit_check = true },
                { entry_window = 55, exit_window = 20, atr_window = 20 },
            ]
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.instruments.len(), 1);
        assert_eq!(config.instruments[0].signals[0], SignalParams::system_one());
        // profit_check defaults off when omitted.
        assert_eq!(config.instruments[0].signals[1], SignalParams::system_two());
    }

    #[test]
    fn series_capacity_defaults() {
        let text = r#"
            portfolio_value = 1000000.0

            [[instruments]]
            symbol = "cu"
            contract_size = 10.0
            signals = [{ entry_window = 20, exit_window = 10, atr_window = 20 }]
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.series_capacity, DEFAULT_SERIES_CAPACITY);
    }

    #[test]
    fn rejects_non_positive_portfolio_value() {
        let mut config = reference_config();
        config.portfolio_value = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositivePortfolioValue(_))
        ));
    }

    #[test]
    fn rejects_empty_instruments() {
        let config = EngineConfig::new(1_000_000.0, Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoInstruments)));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let config = EngineConfig::new(
            1_000_000.0,
            vec![
                InstrumentConfig::reference("cu", 10.0),
                InstrumentConfig::reference("cu", 5.0),
            ],
        );
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateSymbol(s)) if s == "cu"));
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = reference_config();
        config.instruments[0].signals[0].exit_window = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroWindow { window: "exit", .. })
        ));
    }

    #[test]
    fn rejects_capacity_below_widest_window() {
        let mut config = reference_config();
        config.series_capacity = 40; // system two needs 55
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityTooSmall { required: 55, .. })
        ));
    }

    #[test]
    fn rejects_capacity_that_starves_atr() {
        // Windows of 20 fit in 20 bars, but ATR(20) needs 21.
        let mut config = EngineConfig::new(
            1_000_000.0,
            vec![InstrumentConfig {
                symbol: "cu".into(),
                contract_size: 10.0,
                signals: vec![SignalParams::new(20, 10, 20, false)],
            }],
        );
        config.series_capacity = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityTooSmall { required: 21, .. })
        ));
    }

    #[test]
    fn parse_error_surfaces() {
        assert!(matches!(
            EngineConfig::from_toml_str("portfolio_value = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
