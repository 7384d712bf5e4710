//! Read-side reductions over the full record set.
//!
//! # Responsibility
//! - Compute admin summary counters.
//! - Serialize records into the downloadable CSV format.
//!
//! # Invariants
//! - Both transformations are pure over their input slice.
//! - Input order is preserved; callers pass the deterministic store order.

pub mod csv_export;
pub mod stats;
