//! # Ports Layer
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the dashboards)
//! - `outbound.rs` - Driven ports (dependencies required by the store)

pub mod inbound;
pub mod outbound;
