//! # Inbound Ports (Driving Ports)
//!
//! The API the marketplace dashboards drive the ledger through.

use crate::domain::audit::AuditReport;
use crate::domain::entities::{Batch, BatchStatus, NewBatch, UserData};
use crate::domain::errors::LedgerError;
use crate::domain::outcome::MutationOutcome;
use crate::domain::summary::LedgerSummary;

/// Primary API for the ledger store.
///
/// Reads never change state. Every mutation that changes state persists the
/// full snapshot before returning; a persistence failure is returned as
/// `LedgerError::Storage` and the in-memory change is kept.
pub trait LedgerApi {
    // === Reads ===

    /// Aggregates for `wallet`, or a zero-valued record if it has none.
    /// The default record is not stored.
    fn get_user_data(&self, wallet: &str) -> UserData;

    /// Batches in `status`, in store order (newest registration first).
    fn get_batches_by_status(&self, status: BatchStatus) -> Vec<Batch>;

    /// Batches registered by `wallet`, in store order.
    fn get_batches_for_producer(&self, wallet: &str) -> Vec<Batch>;

    fn get_batch(&self, batch_id: &str) -> Option<Batch>;

    /// Every batch, in store order.
    fn batches(&self) -> &[Batch];

    fn summary(&self) -> LedgerSummary;

    /// Check wallet aggregates against the sold batches.
    fn audit(&self) -> AuditReport;

    // === Mutations ===

    /// Register a batch as `Pending` with a fresh id and prepend it.
    ///
    /// No validation of volume or producer is performed. A non-finite volume
    /// is persisted as `null` and reloads as zero.
    fn register_new_batch(&mut self, data: NewBatch) -> Result<Batch, LedgerError>;

    /// Certifier action: set `status`, and `price` when given.
    ///
    /// Omitting `price` keeps the existing one. Wallet aggregates are not
    /// touched.
    ///
    /// ## Outcomes
    ///
    /// - `NotFound`: no batch with this id
    /// - `InvalidState`: target is `Sold` (only a purchase sells), or the
    ///   batch is already `Sold`
    ///
    /// The marketplace UI replaced the status unconditionally; code ported
    /// from it must expect these two transitions to be refused.
    fn update_batch_status(
        &mut self,
        batch_id: &str,
        status: BatchStatus,
        price: Option<f64>,
    ) -> Result<MutationOutcome, LedgerError>;

    /// Buyer action: purchase a certified, priced batch.
    ///
    /// ## Outcomes
    ///
    /// - `NotFound`: no batch with this id
    /// - `InvalidState`: batch is not `Certified`, has no usable price, or
    ///   `volume * price` is not a finite amount
    fn purchase_batch(
        &mut self,
        batch_id: &str,
        buyer_wallet: &str,
    ) -> Result<MutationOutcome, LedgerError>;

    /// Drop all state. With demo seeding configured the seed is restored and
    /// persisted; otherwise the persisted snapshot is deleted.
    fn reset(&mut self) -> Result<(), LedgerError>;
}
