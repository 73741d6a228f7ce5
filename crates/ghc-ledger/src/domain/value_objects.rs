//! # Value Objects
//!
//! Configuration for the ledger store.

use std::fmt;
use std::str::FromStr;

/// Key the marketplace has always persisted its ledger under.
pub const DEFAULT_STORAGE_KEY: &str = "green-hydrogen-ledger-storage";

/// How new batch ids are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `BATCH-<uuid v4>`.
    #[default]
    Uuid,
    /// `BATCH-<millis>`, bumped past the previous id when the clock stalls.
    MonotonicClock,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Uuid => f.write_str("uuid"),
            IdStrategy::MonotonicClock => f.write_str("monotonic"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "monotonic" | "clock" => Ok(IdStrategy::MonotonicClock),
            other => Err(format!("unknown id strategy: {}", other)),
        }
    }
}

/// Configuration for the ledger store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Key the snapshot is written under (default: `green-hydrogen-ledger-storage`).
    pub storage_key: String,

    /// Start from the demo marketplace data when nothing is persisted yet
    /// (default: false).
    pub seed_demo_data: bool,

    /// Batch id scheme used by hosts that build their generator from config.
    pub id_strategy: IdStrategy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_demo_data: false,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_demo_seed(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }
}
