//! # Ledger API Implementation
//!
//! Implements the LedgerApi trait for reads and mutations.

use super::*;
use crate::domain::audit::{audit_snapshot, AuditReport};
use crate::domain::entities::{BatchStatus, NewBatch, UserData};
use crate::domain::errors::LedgerError;
use crate::domain::outcome::MutationOutcome;
use crate::domain::summary::LedgerSummary;
use crate::ports::inbound::LedgerApi;
use tracing::{debug, info, warn};

impl<KV, IG, TS> LedgerApi for LedgerStore<KV, IG, TS>
where
    KV: KeyValueStore,
    IG: BatchIdGenerator,
    TS: TimeSource,
{
    fn get_user_data(&self, wallet: &str) -> UserData {
        self.state.user_data.get(wallet).cloned().unwrap_or_default()
    }

    fn get_batches_by_status(&self, status: BatchStatus) -> Vec<Batch> {
        self.state
            .batches
            .iter()
            .filter(|b| b.status == status)
            .cloned()
            .collect()
    }

    fn get_batches_for_producer(&self, wallet: &str) -> Vec<Batch> {
        self.state
            .batches
            .iter()
            .filter(|b| b.producer == wallet)
            .cloned()
            .collect()
    }

    fn get_batch(&self, batch_id: &str) -> Option<Batch> {
        self.find_batch(batch_id).cloned()
    }

    fn batches(&self) -> &[Batch] {
        &self.state.batches
    }

    fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_batches(&self.state.batches, self.state.user_data.len())
    }

    fn audit(&self) -> AuditReport {
        let report = audit_snapshot(&self.state);
        if !report.is_consistent() {
            warn!(
                "[ghc-ledger] Audit found {} inconsistency(ies)",
                report.findings.len()
            );
        }
        report
    }

    fn register_new_batch(&mut self, data: NewBatch) -> Result<Batch, LedgerError> {
        let id = self.fresh_batch_id();
        let batch = data.into_batch(id);
        self.state.batches.insert(0, batch.clone());

        info!(
            "[ghc-ledger] Registered {} ({} GHC, {}) for {}",
            batch.id, batch.volume, batch.energy_source, batch.producer
        );

        self.persist()?;
        Ok(batch)
    }

    fn update_batch_status(
        &mut self,
        batch_id: &str,
        status: BatchStatus,
        price: Option<f64>,
    ) -> Result<MutationOutcome, LedgerError> {
        let Some(index) = self.position_of(batch_id) else {
            warn!("[ghc-ledger] Status update ignored: unknown batch {}", batch_id);
            return Ok(MutationOutcome::NotFound {
                batch_id: batch_id.to_string(),
            });
        };

        let batch = &mut self.state.batches[index];
        let rejection = if batch.status == BatchStatus::Sold {
            Some("batch already sold")
        } else if status == BatchStatus::Sold {
            Some("only a purchase can mark a batch sold")
        } else {
            None
        };
        if let Some(reason) = rejection {
            warn!(
                "[ghc-ledger] Status update of {} to {} ignored: {}",
                batch_id, status, reason
            );
            return Ok(MutationOutcome::InvalidState {
                batch_id: batch_id.to_string(),
                status: batch.status,
                reason,
            });
        }

        batch.status = status;
        if let Some(price) = price {
            batch.price = Some(price);
        }
        info!(
            "[ghc-ledger] {} is now {} (price: {:?})",
            batch.id, batch.status, batch.price
        );

        self.persist()?;
        Ok(MutationOutcome::Applied)
    }

    fn purchase_batch(
        &mut self,
        batch_id: &str,
        buyer_wallet: &str,
    ) -> Result<MutationOutcome, LedgerError> {
        let Some(index) = self.position_of(batch_id) else {
            warn!("[ghc-ledger] Purchase ignored: unknown batch {}", batch_id);
            return Ok(MutationOutcome::NotFound {
                batch_id: batch_id.to_string(),
            });
        };

        let before = self.state.batches[index].clone();
        let price = match (before.status, before.sale_price()) {
            (BatchStatus::Certified, Some(price)) if (before.volume * price).is_finite() => price,
            (status, price) => {
                let reason = if status != BatchStatus::Certified {
                    "batch is not certified"
                } else if price.is_none() {
                    "batch has no price"
                } else {
                    "sale value is not a finite amount"
                };
                warn!("[ghc-ledger] Purchase of {} ignored: {}", batch_id, reason);
                return Ok(MutationOutcome::InvalidState {
                    batch_id: batch_id.to_string(),
                    status,
                    reason,
                });
            }
        };

        let sold = &mut self.state.batches[index];
        sold.status = BatchStatus::Sold;
        sold.buyer = Some(buyer_wallet.to_string());

        self.state
            .user_data
            .entry(buyer_wallet.to_string())
            .or_default()
            .record_purchase(&before, price);
        self.state
            .user_data
            .entry(before.producer.clone())
            .or_default()
            .record_sale(&before, price);

        info!(
            "[ghc-ledger] {} sold to {}: {} GHC for {}",
            before.id,
            buyer_wallet,
            before.volume,
            before.volume * price
        );

        self.persist()?;
        Ok(MutationOutcome::Applied)
    }

    fn reset(&mut self) -> Result<(), LedgerError> {
        self.state = initial_state(&self.config, &self.time_source);
        info!(
            "[ghc-ledger] Ledger reset ({} batch(es))",
            self.state.batches.len()
        );

        if self.config.seed_demo_data {
            self.persist()
        } else {
            debug!("[ghc-ledger] Clearing persisted snapshot");
            self.clear_persisted()
        }
    }
}
