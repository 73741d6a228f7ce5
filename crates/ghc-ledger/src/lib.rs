//! # Green Hydrogen Credit Ledger
//!
//! The single source of truth for credit batches and wallet aggregates behind
//! the marketplace dashboards.
//!
//! ## Lifecycle
//!
//! ```text
//! register ──→ Pending ──certify──→ Certified ──purchase──→ Sold
//!                 │                     │
//!                 └──reject──→ Rejected ←┘
//! ```
//!
//! A purchase moves `volume` credits to the buyer's balance, charges
//! `volume * price`, and credits the same amount to the producer.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique ids | No two batches share an id |
//! | Buyer iff sold | `buyer` is set exactly when `status == Sold` |
//! | Sold is terminal | Only a purchase sells a batch; nothing leaves `Sold` |
//! | Balanced aggregates | Wallet totals equal what the sold batches imply |
//! | Durable mutations | Every applied mutation rewrites the persisted snapshot |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, snapshot layout, demo seed, audit and summary
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Key-value stores, clocks and id generators
//! - `service/` - `LedgerStore`, implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use ghc_ledger::{BatchStatus, InMemoryLedgerStore, LedgerApi, LedgerConfig, NewBatch};
//!
//! let mut store = InMemoryLedgerStore::new_in_memory(LedgerConfig::default());
//!
//! let batch = store.register_new_batch(NewBatch::new("P1", 100.0, "Solar", "x"))?;
//! store.update_batch_status(&batch.id, BatchStatus::Certified, Some(2.0))?;
//! store.purchase_batch(&batch.id, "B1")?.into_result()?;
//!
//! assert_eq!(store.get_user_data("B1").total_spent, 200.0);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{
    id_generator_for, FileBackedKVStore, FixedTimeSource, InMemoryKVStore,
    MonotonicBatchIdGenerator, SystemTimeSource, UuidBatchIdGenerator, BATCH_ID_PREFIX,
};
pub use domain::audit::{audit_snapshot, AuditFinding, AuditReport};
pub use domain::entities::{Batch, BatchId, BatchStatus, NewBatch, UserData, Wallet};
pub use domain::errors::{KVStoreError, LedgerError};
pub use domain::outcome::MutationOutcome;
pub use domain::seed::demo_seed;
pub use domain::snapshot::{LedgerSnapshot, PersistedEnvelope, SNAPSHOT_VERSION};
pub use domain::summary::{LedgerSummary, StatusTotals};
pub use domain::value_objects::{IdStrategy, LedgerConfig, DEFAULT_STORAGE_KEY};
pub use ports::inbound::LedgerApi;
pub use ports::outbound::{BatchIdGenerator, KeyValueStore, TimeSource};
pub use service::{InMemoryLedgerStore, LedgerDependencies, LedgerStore};
