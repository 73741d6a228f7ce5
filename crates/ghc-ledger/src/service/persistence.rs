//! # Snapshot Persistence
//!
//! Loading the store from its key-value backend and writing the full
//! snapshot back after each change.

use super::*;
use crate::domain::errors::LedgerError;
use crate::domain::snapshot::{PersistedEnvelope, SNAPSHOT_VERSION};
use tracing::{debug, error, info, warn};

impl<KV, IG, TS> LedgerStore<KV, IG, TS>
where
    KV: KeyValueStore,
    IG: BatchIdGenerator,
    TS: TimeSource,
{
    /// Open the store, rehydrating from `config.storage_key`.
    ///
    /// Nothing persisted: start empty, or from the demo seed when
    /// `seed_demo_data` is set. A persisted snapshot that cannot be decoded
    /// is an error; it is never silently replaced.
    pub fn open(
        deps: LedgerDependencies<KV, IG, TS>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let stored = deps.kv_store.get(config.storage_key.as_bytes())?;

        let state = match stored {
            Some(bytes) => {
                let envelope = PersistedEnvelope::decode(&bytes)?;
                if envelope.version != SNAPSHOT_VERSION {
                    warn!(
                        "[ghc-ledger] Snapshot version {} differs from {}, loading without migration",
                        envelope.version, SNAPSHOT_VERSION
                    );
                }
                info!(
                    "[ghc-ledger] Rehydrated {} batch(es) and {} wallet(s) from '{}'",
                    envelope.state.batches.len(),
                    envelope.state.user_data.len(),
                    config.storage_key
                );
                envelope.state
            }
            None => {
                info!(
                    "[ghc-ledger] Nothing persisted under '{}', starting {}",
                    config.storage_key,
                    if config.seed_demo_data { "from demo seed" } else { "empty" }
                );
                initial_state(&config, &deps.time_source)
            }
        };

        Ok(Self::from_parts(deps, config, state))
    }

    /// Write the full snapshot under the storage key, replacing the old one.
    pub(crate) fn persist(&mut self) -> Result<(), LedgerError> {
        let bytes = PersistedEnvelope::encode_state(&self.state)?;

        if let Err(e) = self
            .kv_store
            .put(self.config.storage_key.as_bytes(), &bytes)
        {
            error!("[ghc-ledger] Failed to persist ledger snapshot: {}", e);
            return Err(e.into());
        }

        debug!(
            "[ghc-ledger] Persisted {} bytes under '{}'",
            bytes.len(),
            self.config.storage_key
        );
        Ok(())
    }

    /// Remove the persisted snapshot.
    pub(crate) fn clear_persisted(&mut self) -> Result<(), LedgerError> {
        self.kv_store
            .delete(self.config.storage_key.as_bytes())
            .map_err(|e| {
                error!("[ghc-ledger] Failed to clear ledger snapshot: {}", e);
                LedgerError::from(e)
            })
    }
}
