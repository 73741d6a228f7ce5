//! # Domain Layer
//!
//! Pure ledger logic. No I/O happens here.
//!
//! ## Modules
//!
//! - `entities` - Batch, BatchStatus, UserData, NewBatch
//! - `snapshot` - Persisted state layout and envelope
//! - `outcome` - Explicit results of mutating calls
//! - `errors` - Domain error types
//! - `value_objects` - Configuration
//! - `seed` - Demo marketplace data
//! - `audit` - Consistency check of wallet aggregates against batches
//! - `summary` - Ledger-wide totals

pub mod audit;
pub mod entities;
pub mod errors;
pub mod outcome;
pub mod seed;
pub mod snapshot;
pub mod summary;
pub mod value_objects;
