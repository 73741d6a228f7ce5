//! # Mutation Outcomes
//!
//! Every mutating ledger call reports what happened. Ignoring the outcome
//! gives the marketplace's historical behavior: unknown ids and wrong states
//! are silent no-ops. `into_result` turns the rejections into errors for
//! callers that want a strict contract.

use super::entities::{BatchId, BatchStatus};
use super::errors::LedgerError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MutationOutcome {
    /// The mutation was applied and persisted.
    Applied,
    /// No batch has this id. Nothing changed.
    NotFound { batch_id: BatchId },
    /// The batch exists but its state forbids the mutation. Nothing changed.
    InvalidState {
        batch_id: BatchId,
        status: BatchStatus,
        reason: &'static str,
    },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    /// Strict view: rejections become `LedgerError`.
    pub fn into_result(self) -> Result<(), LedgerError> {
        match self {
            MutationOutcome::Applied => Ok(()),
            MutationOutcome::NotFound { batch_id } => Err(LedgerError::BatchNotFound { batch_id }),
            MutationOutcome::InvalidState {
                batch_id,
                status,
                reason,
            } => Err(LedgerError::InvalidState {
                batch_id,
                status,
                reason,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_maps_rejections() {
        assert!(MutationOutcome::Applied.into_result().is_ok());

        let not_found = MutationOutcome::NotFound {
            batch_id: "BATCH-404".into(),
        };
        assert!(matches!(
            not_found.into_result(),
            Err(LedgerError::BatchNotFound { batch_id }) if batch_id == "BATCH-404"
        ));

        let invalid = MutationOutcome::InvalidState {
            batch_id: "BATCH-1".into(),
            status: BatchStatus::Sold,
            reason: "batch already sold",
        };
        assert!(matches!(
            invalid.into_result(),
            Err(LedgerError::InvalidState { status: BatchStatus::Sold, .. })
        ));
    }

    #[test]
    fn test_outcome_json_shape() {
        let invalid = MutationOutcome::InvalidState {
            batch_id: "BATCH-1".into(),
            status: BatchStatus::Pending,
            reason: "batch is not certified",
        };
        let json = serde_json::to_value(&invalid).unwrap();

        assert_eq!(json["outcome"], "invalidState");
        assert_eq!(json["batchId"], "BATCH-1");
        assert_eq!(json["status"], "Pending");
        assert_eq!(
            serde_json::to_value(MutationOutcome::Applied).unwrap()["outcome"],
            "applied"
        );
    }
}
