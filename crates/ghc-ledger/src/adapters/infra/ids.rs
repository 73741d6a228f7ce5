use super::time::SystemTimeSource;
use crate::domain::entities::BatchId;
use crate::domain::value_objects::IdStrategy;
use crate::ports::outbound::{BatchIdGenerator, TimeSource};
use uuid::Uuid;

/// Prefix shared by every batch id.
pub const BATCH_ID_PREFIX: &str = "BATCH-";

/// `BATCH-<uuid v4>` ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidBatchIdGenerator;

impl BatchIdGenerator for UuidBatchIdGenerator {
    fn next_id(&mut self) -> BatchId {
        format!("{}{}", BATCH_ID_PREFIX, Uuid::new_v4())
    }
}

/// `BATCH-<millis>` ids that never repeat.
///
/// Uses the clock when it has moved past the last id, otherwise last + 1.
#[derive(Debug)]
pub struct MonotonicBatchIdGenerator<TS: TimeSource> {
    time_source: TS,
    last: Option<u64>,
}

impl<TS: TimeSource> MonotonicBatchIdGenerator<TS> {
    pub fn new(time_source: TS) -> Self {
        Self {
            time_source,
            last: None,
        }
    }
}

impl<TS: TimeSource> BatchIdGenerator for MonotonicBatchIdGenerator<TS> {
    fn next_id(&mut self) -> BatchId {
        let now = self.time_source.now_millis();
        let next = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(next);
        format!("{}{}", BATCH_ID_PREFIX, next)
    }
}

/// Generator for a configured strategy, on the system clock.
pub fn id_generator_for(strategy: IdStrategy) -> Box<dyn BatchIdGenerator> {
    match strategy {
        IdStrategy::Uuid => Box::new(UuidBatchIdGenerator),
        IdStrategy::MonotonicClock => Box::new(MonotonicBatchIdGenerator::new(SystemTimeSource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::infra::time::FixedTimeSource;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_monotonic_ids_do_not_collide_within_a_millisecond() {
        let clock = Arc::new(FixedTimeSource::new(1_700_000_000_000));
        let mut ids = MonotonicBatchIdGenerator::new(Arc::clone(&clock));

        assert_eq!(ids.next_id(), "BATCH-1700000000000");
        assert_eq!(ids.next_id(), "BATCH-1700000000001");
        assert_eq!(ids.next_id(), "BATCH-1700000000002");

        // Clock moves ahead of the counter: follow the clock.
        clock.set(1_700_000_000_500);
        assert_eq!(ids.next_id(), "BATCH-1700000000500");

        // Clock goes backwards: keep counting.
        clock.set(1_600_000_000_000);
        assert_eq!(ids.next_id(), "BATCH-1700000000501");
    }

    #[test]
    fn test_uuid_ids_are_prefixed_and_unique() {
        let mut ids = UuidBatchIdGenerator;
        let generated: HashSet<_> = (0..100).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 100);
        assert!(generated.iter().all(|id| id.starts_with(BATCH_ID_PREFIX)));
    }

    #[test]
    fn test_generator_for_strategy() {
        let mut ids = id_generator_for(IdStrategy::MonotonicClock);
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert!(first[BATCH_ID_PREFIX.len()..].parse::<u64>().is_ok());
    }
}
