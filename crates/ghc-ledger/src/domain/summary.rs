//! Ledger-wide totals for the auditor and homepage dashboards.

use super::entities::{Batch, BatchStatus};
use serde::Serialize;

/// Count and volume of the batches in one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusTotals {
    pub count: u64,
    pub volume: f64,
}

impl StatusTotals {
    fn add(&mut self, batch: &Batch) {
        self.count += 1;
        self.volume += batch.volume;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_batches: u64,
    pub pending: StatusTotals,
    pub certified: StatusTotals,
    pub rejected: StatusTotals,
    pub sold: StatusTotals,
    /// Sum of `volume * price` over sold batches.
    pub traded_value: f64,
    pub wallets: u64,
}

impl LedgerSummary {
    pub fn from_batches<'a>(batches: impl IntoIterator<Item = &'a Batch>, wallets: usize) -> Self {
        let mut summary = LedgerSummary {
            wallets: wallets as u64,
            ..LedgerSummary::default()
        };
        for batch in batches {
            summary.total_batches += 1;
            match batch.status {
                BatchStatus::Pending => summary.pending.add(batch),
                BatchStatus::Certified => summary.certified.add(batch),
                BatchStatus::Rejected => summary.rejected.add(batch),
                BatchStatus::Sold => {
                    summary.sold.add(batch);
                    summary.traded_value += batch.total_value();
                }
            }
        }
        summary
    }

    pub fn totals(&self, status: BatchStatus) -> StatusTotals {
        match status {
            BatchStatus::Pending => self.pending,
            BatchStatus::Certified => self.certified,
            BatchStatus::Rejected => self.rejected,
            BatchStatus::Sold => self.sold,
        }
    }
}
