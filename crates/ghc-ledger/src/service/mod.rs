//! # Ledger Store Service
//!
//! The single source of truth for batches and wallet aggregates.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `LedgerApi` for reads and the register/certify/purchase
//!    mutations
//! 2. Persists the full snapshot after every applied mutation
//! 3. Uses dependency injection for storage, ids and time; there is no
//!    process-wide instance

mod api;
mod persistence;

use crate::adapters::{InMemoryKVStore, SystemTimeSource, UuidBatchIdGenerator};
use crate::domain::entities::Batch;
use crate::domain::seed::demo_seed;
use crate::domain::snapshot::LedgerSnapshot;
use crate::domain::value_objects::LedgerConfig;
use crate::ports::outbound::{BatchIdGenerator, KeyValueStore, TimeSource};
use tracing::warn;

/// Ledger store backed entirely by memory.
pub type InMemoryLedgerStore = LedgerStore<InMemoryKVStore, UuidBatchIdGenerator, SystemTimeSource>;

/// The ledger store.
///
/// Exclusively owns the batch list and the wallet table; callers only ever
/// see clones or shared borrows.
pub struct LedgerStore<KV, IG, TS>
where
    KV: KeyValueStore,
    IG: BatchIdGenerator,
    TS: TimeSource,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Source of fresh batch ids.
    pub(crate) id_generator: IG,
    /// Clock for the demo seed.
    pub(crate) time_source: TS,
    pub(crate) config: LedgerConfig,
    pub(crate) state: LedgerSnapshot,
}

/// Dependencies for LedgerStore
pub struct LedgerDependencies<KV, IG, TS> {
    pub kv_store: KV,
    pub id_generator: IG,
    pub time_source: TS,
}

impl InMemoryLedgerStore {
    /// Fresh store on an empty in-memory key-value store.
    pub fn new_in_memory(config: LedgerConfig) -> Self {
        let deps = LedgerDependencies {
            kv_store: InMemoryKVStore::new(),
            id_generator: UuidBatchIdGenerator,
            time_source: SystemTimeSource,
        };
        let state = initial_state(&config, &deps.time_source);
        Self::from_parts(deps, config, state)
    }
}

impl<KV, IG, TS> LedgerStore<KV, IG, TS>
where
    KV: KeyValueStore,
    IG: BatchIdGenerator,
    TS: TimeSource,
{
    pub(crate) fn from_parts(
        deps: LedgerDependencies<KV, IG, TS>,
        config: LedgerConfig,
        state: LedgerSnapshot,
    ) -> Self {
        Self {
            kv_store: deps.kv_store,
            id_generator: deps.id_generator,
            time_source: deps.time_source,
            config,
            state,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current in-memory state.
    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.state
    }

    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    pub(crate) fn position_of(&self, batch_id: &str) -> Option<usize> {
        self.state.batches.iter().position(|b| b.id == batch_id)
    }

    pub(crate) fn find_batch(&self, batch_id: &str) -> Option<&Batch> {
        self.state.batches.iter().find(|b| b.id == batch_id)
    }

    /// Next generated id not already used by a batch in the store.
    pub(crate) fn fresh_batch_id(&mut self) -> String {
        loop {
            let id = self.id_generator.next_id();
            if self.find_batch(&id).is_none() {
                return id;
            }
            warn!("[ghc-ledger] Generated batch id {} already in use, retrying", id);
        }
    }
}

/// State a store starts from when nothing is persisted.
pub(crate) fn initial_state<TS: TimeSource>(config: &LedgerConfig, time_source: &TS) -> LedgerSnapshot {
    if config.seed_demo_data {
        demo_seed(time_source.now_millis())
    } else {
        LedgerSnapshot::default()
    }
}
