//! # Demo Seed
//!
//! Starting data for the marketplace demo: one sold, one certified and one
//! pending batch, with wallet aggregates that agree with the sale.

use super::entities::{Batch, BatchStatus, UserData};
use super::snapshot::LedgerSnapshot;

pub const DEMO_PRODUCER_WALLET: &str = "0xProducerWalletAddress";
pub const DEMO_BUYER_WALLET: &str = "0xBuyerWalletAddress";
pub const DEMO_OTHER_PRODUCER_WALLET: &str = "0xAnotherProducer";

/// Build the demo ledger. Batch ids are derived from `now_millis`.
pub fn demo_seed(now_millis: u64) -> LedgerSnapshot {
    let sold = Batch {
        id: format!("BATCH-{}", now_millis.saturating_sub(20_000)),
        producer: DEMO_PRODUCER_WALLET.to_string(),
        volume: 5000.0,
        energy_source: "Solar".to_string(),
        proof: "proof-solar-1.pdf".to_string(),
        status: BatchStatus::Sold,
        price: Some(3.5),
        buyer: Some(DEMO_BUYER_WALLET.to_string()),
    };
    let certified = Batch {
        id: format!("BATCH-{}", now_millis.saturating_sub(10_000)),
        producer: DEMO_PRODUCER_WALLET.to_string(),
        volume: 3000.0,
        energy_source: "Wind".to_string(),
        proof: "proof-wind-1.pdf".to_string(),
        status: BatchStatus::Certified,
        price: Some(4.1),
        buyer: None,
    };
    let pending = Batch {
        id: format!("BATCH-{}", now_millis.saturating_sub(5_000)),
        producer: DEMO_OTHER_PRODUCER_WALLET.to_string(),
        volume: 8000.0,
        energy_source: "Hydro".to_string(),
        proof: "proof-hydro-1.pdf".to_string(),
        status: BatchStatus::Pending,
        price: None,
        buyer: None,
    };

    let sale_value = sold.total_value();

    let mut snapshot = LedgerSnapshot::default();
    snapshot.user_data.insert(
        DEMO_PRODUCER_WALLET.to_string(),
        UserData {
            total_revenue: sale_value,
            batches_sold: 1,
            ..UserData::default()
        },
    );
    // The history keeps the batch as it looked before the sale.
    let mut bought = sold.clone();
    bought.status = BatchStatus::Certified;
    bought.buyer = None;
    snapshot.user_data.insert(
        DEMO_BUYER_WALLET.to_string(),
        UserData {
            ghc_balance: sold.volume,
            total_spent: sale_value,
            purchase_history: vec![bought],
            ..UserData::default()
        },
    );
    snapshot.batches = vec![sold, certified, pending];
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_contents() {
        let snapshot = demo_seed(1_000_000);

        assert_eq!(snapshot.batches.len(), 3);
        assert_eq!(snapshot.batches[0].id, "BATCH-980000");
        assert_eq!(snapshot.batches[0].status, BatchStatus::Sold);
        assert_eq!(snapshot.batches[1].status, BatchStatus::Certified);
        assert_eq!(snapshot.batches[2].producer, DEMO_OTHER_PRODUCER_WALLET);

        let producer = &snapshot.user_data[DEMO_PRODUCER_WALLET];
        assert_eq!(producer.total_revenue, 17_500.0);
        assert_eq!(producer.batches_sold, 1);

        let buyer = &snapshot.user_data[DEMO_BUYER_WALLET];
        assert_eq!(buyer.ghc_balance, 5000.0);
        assert_eq!(buyer.total_spent, 17_500.0);
        assert_eq!(buyer.purchase_history.len(), 1);
    }
}
