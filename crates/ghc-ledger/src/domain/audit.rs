//! # Consistency Audit
//!
//! Wallet aggregates are maintained incrementally, never recomputed. The
//! audit recomputes what they should be from the `Sold` batches and reports
//! every disagreement, along with batches that break the buyer/status rule.
//!
//! ## Algorithm
//!
//! 1. Walk the batches; flag duplicate ids and buyer/status mismatches
//! 2. For each sold batch: credit the buyer and the producer in a fresh table
//! 3. Compare the fresh table against every stored wallet record
//! 4. Return the report (findings are informational, nothing is repaired)

use super::entities::{BatchId, BatchStatus, UserData, Wallet};
use super::snapshot::LedgerSnapshot;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Result of an audit pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub batches_checked: u64,
    pub wallets_checked: u64,
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn is_consistent(&self) -> bool {
        self.findings.is_empty()
    }
}

/// One inconsistency found by the audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuditFinding {
    /// Two batches share an id.
    DuplicateBatchId { batch_id: BatchId },
    /// `buyer` is set on a batch that is not sold, or missing on a sold one.
    BuyerStatusMismatch { batch_id: BatchId, status: BatchStatus },
    /// A sold batch carries no usable price.
    SoldWithoutPrice { batch_id: BatchId },
    /// A wallet aggregate differs from the figure implied by the sold batches.
    WalletMismatch {
        wallet: Wallet,
        field: &'static str,
        expected: f64,
        actual: f64,
    },
}

/// Audit a ledger snapshot.
pub fn audit_snapshot(snapshot: &LedgerSnapshot) -> AuditReport {
    let mut report = AuditReport::default();
    let mut seen = BTreeSet::new();
    let mut expected: BTreeMap<Wallet, UserData> = BTreeMap::new();

    for batch in &snapshot.batches {
        report.batches_checked += 1;

        if !seen.insert(batch.id.as_str()) {
            report.findings.push(AuditFinding::DuplicateBatchId {
                batch_id: batch.id.clone(),
            });
        }
        if !batch.buyer_matches_status() {
            report.findings.push(AuditFinding::BuyerStatusMismatch {
                batch_id: batch.id.clone(),
                status: batch.status,
            });
        }
        if batch.status != BatchStatus::Sold {
            continue;
        }
        let Some(price) = batch.sale_price() else {
            report.findings.push(AuditFinding::SoldWithoutPrice {
                batch_id: batch.id.clone(),
            });
            continue;
        };
        if let Some(buyer) = &batch.buyer {
            let record = expected.entry(buyer.clone()).or_default();
            record.ghc_balance += batch.volume;
            record.total_spent += batch.volume * price;
        }
        let record = expected.entry(batch.producer.clone()).or_default();
        record.total_revenue += batch.volume * price;
        record.batches_sold += 1;
    }

    let wallets: BTreeSet<&Wallet> = expected.keys().chain(snapshot.user_data.keys()).collect();
    let zero = UserData::default();
    for wallet in wallets {
        report.wallets_checked += 1;
        let want = expected.get(wallet).unwrap_or(&zero);
        let have = snapshot.user_data.get(wallet).unwrap_or(&zero);

        let fields = [
            ("ghcBalance", want.ghc_balance, have.ghc_balance),
            ("totalSpent", want.total_spent, have.total_spent),
            ("totalRevenue", want.total_revenue, have.total_revenue),
            ("batchesSold", want.batches_sold as f64, have.batches_sold as f64),
        ];
        for (field, wanted, stored) in fields {
            if !approx_eq(wanted, stored) {
                report.findings.push(AuditFinding::WalletMismatch {
                    wallet: wallet.clone(),
                    field,
                    expected: wanted,
                    actual: stored,
                });
            }
        }
    }

    report
}

fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= scale * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::{demo_seed, DEMO_BUYER_WALLET};

    #[test]
    fn test_demo_seed_is_consistent() {
        let report = audit_snapshot(&demo_seed(1_000_000));
        assert!(report.is_consistent(), "{:?}", report.findings);
        assert_eq!(report.batches_checked, 3);
        assert_eq!(report.wallets_checked, 2);
    }

    #[test]
    fn test_tampered_balance_is_reported() {
        let mut snapshot = demo_seed(1_000_000);
        snapshot
            .user_data
            .get_mut(DEMO_BUYER_WALLET)
            .unwrap()
            .ghc_balance = 1.0;

        let report = audit_snapshot(&snapshot);
        assert_eq!(
            report.findings,
            vec![AuditFinding::WalletMismatch {
                wallet: DEMO_BUYER_WALLET.to_string(),
                field: "ghcBalance",
                expected: 5000.0,
                actual: 1.0,
            }]
        );
    }

    #[test]
    fn test_structural_findings() {
        let mut snapshot = demo_seed(1_000_000);
        snapshot.batches[1].buyer = Some("0xSomeone".into());
        let duplicate = snapshot.batches[2].clone();
        snapshot.batches.push(duplicate);

        let report = audit_snapshot(&snapshot);
        assert!(report.findings.iter().any(|f| matches!(
            f,
            AuditFinding::BuyerStatusMismatch { status: BatchStatus::Certified, .. }
        )));
        assert!(report
            .findings
            .iter()
            .any(|f| matches!(f, AuditFinding::DuplicateBatchId { .. })));
    }
}
