//! Store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the insert/scan-all contract shared by Intake and Aggregator.
//! - Isolate SQLite details from service orchestration.
//! - Provide an in-memory store for isolated tests and embedding.
//!
//! # Invariants
//! - Stores never mutate or delete a record after insertion.
//! - Identifier uniqueness holds under concurrent writers.
//! - `scan_all` order is deterministic: timestamp ascending, then
//!   insertion order.

pub mod in_memory;
pub mod rsvp_store;
pub mod sqlite_store;
