//! Core domain logic for wedding RSVP collection.
//! This crate is the single source of truth for RSVP invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, parse_log_level, LoggingError,
};
pub use model::rsvp::{
    EventTag, GuestStatus, Rsvp, RsvpId, RsvpSubmission, RsvpValidationError, ValidatedRsvp,
};
pub use repo::in_memory::InMemoryRsvpStore;
pub use repo::rsvp_store::{RsvpStore, StoreError, StoreResult};
pub use repo::sqlite_store::SqliteRsvpStore;
pub use report::csv_export::{
    render_csv, write_csv, ExportError, EXPORT_CONTENT_TYPE, EXPORT_FILENAME, EXPORT_HEADER,
};
pub use report::stats::RsvpStats;
pub use service::aggregator_service::{AdminDashboard, AggregatorError, CsvExport, RsvpAggregator};
pub use service::intake_service::{IntakeError, RsvpIntake};
