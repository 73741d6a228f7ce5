//! # Domain Errors
//!
//! Rejected mutations are not errors by default: they come back as a
//! [`MutationOutcome`](super::outcome::MutationOutcome) and leave the store
//! untouched. `LedgerError` covers infrastructure failures, and the strict
//! variants a caller gets from `MutationOutcome::into_result`.

use super::entities::{BatchId, BatchStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Batch not found: {batch_id}")]
    BatchNotFound { batch_id: BatchId },

    #[error("Invalid state for batch {batch_id} ({status}): {reason}")]
    InvalidState {
        batch_id: BatchId,
        status: BatchStatus,
        reason: &'static str,
    },
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<std::io::Error> for KVStoreError {
    fn from(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}
