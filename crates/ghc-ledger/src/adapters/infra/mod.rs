//! Infrastructure adapters: clocks and batch id generators.

mod ids;
mod time;

pub use ids::{id_generator_for, MonotonicBatchIdGenerator, UuidBatchIdGenerator, BATCH_ID_PREFIX};
pub use time::{FixedTimeSource, SystemTimeSource};
