//! End-to-end flows against the file-backed store.

use ghc_ledger::{
    BatchStatus, FileBackedKVStore, KVStoreError, LedgerApi, LedgerConfig, LedgerDependencies,
    LedgerError, LedgerStore, MonotonicBatchIdGenerator, NewBatch, SystemTimeSource,
    UuidBatchIdGenerator, BATCH_ID_PREFIX,
};
use std::path::Path;
use tempfile::TempDir;

type FileLedger = LedgerStore<FileBackedKVStore, UuidBatchIdGenerator, SystemTimeSource>;

fn open_ledger(path: &Path, config: LedgerConfig) -> FileLedger {
    let deps = LedgerDependencies {
        kv_store: FileBackedKVStore::open(path).unwrap(),
        id_generator: UuidBatchIdGenerator,
        time_source: SystemTimeSource,
    };
    LedgerStore::open(deps, config).unwrap()
}

#[test]
fn test_ledger_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.bin");

    let (sold_id, pending_id) = {
        let mut ledger = open_ledger(&path, LedgerConfig::default());
        let sold = ledger
            .register_new_batch(NewBatch::new("P1", 100.0, "Solar", "x"))
            .unwrap();
        let pending = ledger
            .register_new_batch(NewBatch::new("P2", 12.5, "Wind", "y"))
            .unwrap();
        ledger
            .update_batch_status(&sold.id, BatchStatus::Certified, Some(2.0))
            .unwrap();
        ledger.purchase_batch(&sold.id, "B1").unwrap();
        (sold.id, pending.id)
    };

    let ledger = open_ledger(&path, LedgerConfig::default());

    assert_eq!(ledger.batches().len(), 2);
    assert_eq!(ledger.batches()[0].id, pending_id);
    let sold = ledger.get_batch(&sold_id).unwrap();
    assert_eq!(sold.status, BatchStatus::Sold);
    assert_eq!(sold.buyer.as_deref(), Some("B1"));

    let buyer = ledger.get_user_data("B1");
    assert_eq!(buyer.ghc_balance, 100.0);
    assert_eq!(buyer.total_spent, 200.0);
    assert_eq!(buyer.purchase_history[0].id, sold_id);
    assert_eq!(ledger.get_user_data("P1").total_revenue, 200.0);
    assert!(ledger.audit().is_consistent());
}

#[test]
fn test_storage_keys_are_independent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.bin");

    {
        let mut ledger = open_ledger(&path, LedgerConfig::default().with_storage_key("a"));
        ledger
            .register_new_batch(NewBatch::new("P1", 1.0, "Solar", "x"))
            .unwrap();
    }

    let other = open_ledger(&path, LedgerConfig::default().with_storage_key("b"));
    assert!(other.batches().is_empty());
    let first = open_ledger(&path, LedgerConfig::default().with_storage_key("a"));
    assert_eq!(first.batches().len(), 1);
}

#[test]
fn test_seeded_ledger_persists_only_after_first_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.bin");
    let config = LedgerConfig::default().with_demo_seed(true);

    {
        let ledger = open_ledger(&path, config.clone());
        assert_eq!(ledger.batches().len(), 3);
    }
    assert!(!path.exists());

    let certified_id = {
        let mut ledger = open_ledger(&path, config.clone());
        let certified = ledger.get_batches_by_status(BatchStatus::Certified);
        let id = certified[0].id.clone();
        assert!(ledger.purchase_batch(&id, "B2").unwrap().is_applied());
        id
    };

    // A seeded config never overrides what is already on disk.
    let ledger = open_ledger(&path, config);
    assert_eq!(
        ledger.get_batch(&certified_id).unwrap().status,
        BatchStatus::Sold
    );
    assert_eq!(ledger.get_user_data("B2").ghc_balance, 3000.0);
    assert!(ledger.audit().is_consistent());
}

#[test]
fn test_reset_removes_persisted_ledger() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.bin");

    {
        let mut ledger = open_ledger(&path, LedgerConfig::default());
        ledger
            .register_new_batch(NewBatch::new("P1", 1.0, "Solar", "x"))
            .unwrap();
        ledger.reset().unwrap();
    }

    let ledger = open_ledger(&path, LedgerConfig::default());
    assert!(ledger.batches().is_empty());
}

#[test]
fn test_monotonic_ids_in_a_burst() {
    let dir = TempDir::new().unwrap();
    let deps = LedgerDependencies {
        kv_store: FileBackedKVStore::open(dir.path().join("ledger.bin")).unwrap(),
        id_generator: MonotonicBatchIdGenerator::new(SystemTimeSource),
        time_source: SystemTimeSource,
    };
    let mut ledger = LedgerStore::open(deps, LedgerConfig::default()).unwrap();

    let mut ids: Vec<_> = (0..20)
        .map(|_| {
            ledger
                .register_new_batch(NewBatch::new("P1", 1.0, "Solar", "x"))
                .unwrap()
                .id
        })
        .collect();
    assert!(ids.iter().all(|id| id.starts_with(BATCH_ID_PREFIX)));

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_corrupt_storage_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.bin");
    std::fs::write(&path, [0xFF, 0xFF, 0xFF, 0x7F, 0x01]).unwrap();

    let result = FileBackedKVStore::open(&path);
    assert!(matches!(result, Err(KVStoreError::CorruptionError { .. })));
}

#[test]
fn test_strict_callers_see_rejections_as_errors() {
    let dir = TempDir::new().unwrap();
    let mut ledger = open_ledger(&dir.path().join("ledger.bin"), LedgerConfig::default());
    let batch = ledger
        .register_new_batch(NewBatch::new("P1", 1.0, "Solar", "x"))
        .unwrap();

    let err = ledger
        .purchase_batch(&batch.id, "B1")
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InvalidState {
            status: BatchStatus::Pending,
            ..
        }
    ));

    let err = ledger
        .purchase_batch("BATCH-missing", "B1")
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(matches!(err, LedgerError::BatchNotFound { .. }));
}
