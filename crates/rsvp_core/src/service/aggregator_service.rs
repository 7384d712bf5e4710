//! Admin aggregation use cases.
//!
//! # Responsibility
//! - List every record, compute summary counters and produce the CSV export.
//!
//! # Invariants
//! - Each call reads one snapshot from the store and never writes.
//! - Callers have already passed the admin gate; no auth happens here.

use crate::model::rsvp::Rsvp;
use crate::report::csv_export::{render_csv, ExportError, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
use crate::report::stats::RsvpStats;
use crate::repo::rsvp_store::{RsvpStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of an aggregator call.
#[derive(Debug)]
pub enum AggregatorError {
    Store(StoreError),
    Export(ExportError),
}

impl Display for AggregatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AggregatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<StoreError> for AggregatorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ExportError> for AggregatorError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Downloadable CSV payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download filename.
    pub filename: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Listing and counters computed from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    pub rsvps: Vec<Rsvp>,
    pub stats: RsvpStats,
}

/// Read-side service for the administrator.
pub struct RsvpAggregator<S: RsvpStore> {
    store: S,
}

impl<S: RsvpStore> RsvpAggregator<S> {
    /// Creates an aggregator reading from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all records in store order (timestamp ascending).
    pub fn list_rsvps(&self) -> Result<Vec<Rsvp>, AggregatorError> {
        let records = self.snapshot("list")?;
        Ok(records)
    }

    /// Computes the four summary counters.
    pub fn stats(&self) -> Result<RsvpStats, AggregatorError> {
        let records = self.snapshot("stats")?;
        Ok(RsvpStats::from_records(&records))
    }

    /// Returns listing and counters from one scan.
    pub fn dashboard(&self) -> Result<AdminDashboard, AggregatorError> {
        let rsvps = self.snapshot("dashboard")?;
        let stats = RsvpStats::from_records(&rsvps);
        Ok(AdminDashboard { rsvps, stats })
    }

    /// Serializes every record into the CSV export.
    pub fn export_csv(&self) -> Result<CsvExport, AggregatorError> {
        let records = self.snapshot("export")?;
        let bytes = render_csv(&records).inspect_err(|err| {
            error!("event=rsvp_export module=aggregator status=error error={err}");
        })?;
        info!(
            "event=rsvp_export module=aggregator status=ok rows={} bytes={}",
            records.len(),
            bytes.len()
        );
        Ok(CsvExport {
            filename: EXPORT_FILENAME,
            content_type: EXPORT_CONTENT_TYPE,
            bytes,
        })
    }

    fn snapshot(&self, operation: &'static str) -> Result<Vec<Rsvp>, StoreError> {
        match self.store.scan_all() {
            Ok(records) => {
                info!(
                    "event=rsvp_scan module=aggregator status=ok operation={} count={}",
                    operation,
                    records.len()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=rsvp_scan module=aggregator status=error operation={} retryable={} error={}",
                    operation,
                    err.is_unavailable(),
                    err
                );
                Err(err)
            }
        }
    }
}
