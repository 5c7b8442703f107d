//! Config fingerprinting — deterministic identity for reproducible runs.
//!
//! The engine is bit-for-bit deterministic given a config and a bar stream,
//! so a stable hash of the config identifies a run: two engines with equal
//! fingerprints fed equal bars emit equal orders.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;

/// BLAKE3 hex digest of the canonical config serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(String);

impl ConfigHash {
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash the config's canonical JSON.
///
/// Serialization order is deterministic: struct fields by declaration,
/// instruments and signals in registration order (which is semantically
/// meaningful — reordering them is a different engine).
pub fn config_hash(config: &EngineConfig) -> ConfigHash {
    let json = serde_json::to_string(config).expect("EngineConfig must serialize");
    ConfigHash(blake3::hash(json.as_bytes()).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstrumentConfig;

    fn config() -> EngineConfig {
        EngineConfig::new(1_000_000.0, vec![InstrumentConfig::reference("cu", 10.0)])
    }

    #[test]
    fn equal_configs_hash_equal() {
        assert_eq!(config_hash(&config()), config_hash(&config()));
    }

    #[test]
    fn parameter_change_changes_hash() {
        let mut changed = config();
        changed.instruments[0].signals[0].entry_window = 21;
        assert_ne!(config_hash(&config()), config_hash(&changed));
    }

    #[test]
    fn equity_change_changes_hash() {
        let mut changed = config();
        changed.portfolio_value = 2_000_000.0;
        assert_ne!(config_hash(&config()), config_hash(&changed));
    }
}
