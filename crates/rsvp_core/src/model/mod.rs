//! RSVP domain model.
//!
//! # Responsibility
//! - Define the canonical RSVP record persisted by every store.
//! - Define the fixed enumerations shared with callers.
//! - Turn raw guest submissions into validated record drafts.
//!
//! # Invariants
//! - Records are immutable once created.
//! - `id` and `timestamp` are assigned by core, never guest-supplied.

pub mod rsvp;
