//! # Persisted Snapshot
//!
//! The whole ledger is stored as one JSON document under a single key:
//!
//! ```text
//! { "state": { "batches": [Batch...], "userData": { wallet: UserData } },
//!   "version": 0 }
//! ```
//!
//! Each write replaces the previous document. There is no migration: missing
//! fields load as defaults and unknown fields are ignored.

use super::entities::{Batch, UserData, Wallet};
use super::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version stamped into every envelope.
pub const SNAPSHOT_VERSION: u32 = 0;

/// The ledger's full state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerSnapshot {
    /// Store order: newest registration first.
    pub batches: Vec<Batch>,
    pub user_data: BTreeMap<Wallet, UserData>,
}

/// Envelope written to the key-value store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedEnvelope {
    pub state: LedgerSnapshot,
    pub version: u32,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a LedgerSnapshot,
    version: u32,
}

impl PersistedEnvelope {
    pub fn new(state: LedgerSnapshot) -> Self {
        Self {
            state,
            version: SNAPSHOT_VERSION,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, LedgerError> {
        Self::encode_state(&self.state)
    }

    /// Encode `state` in a current-version envelope without cloning it.
    pub fn encode_state(state: &LedgerSnapshot) -> Result<Vec<u8>, LedgerError> {
        Ok(serde_json::to_vec(&EnvelopeRef {
            state,
            version: SNAPSHOT_VERSION,
        })?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, LedgerError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BatchStatus, NewBatch};

    #[test]
    fn test_envelope_layout() {
        let mut snapshot = LedgerSnapshot::default();
        snapshot
            .batches
            .push(NewBatch::new("P1", 5.0, "Wind", "w.pdf").into_batch("BATCH-1".into()));
        snapshot.user_data.insert("B1".into(), UserData::default());

        let bytes = PersistedEnvelope::new(snapshot).encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["batches"][0]["id"], "BATCH-1");
        assert_eq!(json["state"]["userData"]["B1"]["batchesSold"], 0);
    }

    #[test]
    fn test_decode_partial_snapshot_fills_defaults() {
        let raw = br#"{"state":{"batches":[{"id":"BATCH-9","producer":"P9","status":"Certified","price":2.5}]}}"#;
        let envelope = PersistedEnvelope::decode(raw).unwrap();

        assert_eq!(envelope.version, SNAPSHOT_VERSION);
        assert!(envelope.state.user_data.is_empty());
        let batch = &envelope.state.batches[0];
        assert_eq!(batch.status, BatchStatus::Certified);
        assert_eq!(batch.price, Some(2.5));
        assert_eq!(batch.volume, 0.0);
        assert_eq!(batch.energy_source, "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            PersistedEnvelope::decode(b"not json"),
            Err(LedgerError::Serialization(_))
        ));
    }
}
