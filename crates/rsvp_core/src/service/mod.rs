//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into Intake and Aggregator use cases.
//! - Keep CLI and other callers decoupled from storage details.
//!
//! # Invariants
//! - Services receive their store explicitly; there is no global store.

pub mod aggregator_service;
pub mod intake_service;
