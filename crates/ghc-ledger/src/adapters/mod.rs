//! # Adapters Module
//!
//! Port implementations for the ledger store.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` backends (in-memory, file-backed)
//! - `infra`: time sources and batch id generators

pub mod infra;
pub mod storage;

pub use infra::{
    id_generator_for, FixedTimeSource, MonotonicBatchIdGenerator, SystemTimeSource,
    UuidBatchIdGenerator, BATCH_ID_PREFIX,
};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
