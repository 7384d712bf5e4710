//! CSV export of RSVP records.
//!
//! # Invariants
//! - Header columns are fixed: `Timestamp, Full Name, Events, Status, Plus One`.
//! - Free-text cells are quoted per RFC 4180 when they contain the
//!   delimiter, quotes or line breaks.
//! - `Events` lists labels in canonical order regardless of how the guest
//!   picked them.
//! - `Timestamp` is RFC 3339 UTC with millisecond precision.

use crate::model::rsvp::{EventTag, Rsvp};
use chrono::SecondsFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

/// Suggested download filename for exports.
pub const EXPORT_FILENAME: &str = "wedding_rsvps.csv";
/// Media type of the export payload.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
/// Fixed header row.
pub const EXPORT_HEADER: [&str; 5] = ["Timestamp", "Full Name", "Events", "Status", "Plus One"];

const EVENT_LABEL_SEPARATOR: &str = ", ";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Io(err) => write!(f, "csv export write failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Writes header plus one row per record, in input order.
pub fn write_csv<W: Write>(records: &[Rsvp], writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for record in records {
        csv_writer.write_record(export_row(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the export into an owned byte buffer.
pub fn render_csv(records: &[Rsvp]) -> ExportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

fn export_row(record: &Rsvp) -> [String; 5] {
    [
        record
            .timestamp()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        record.full_name().to_string(),
        events_cell(record),
        record.guest().label().to_string(),
        record.plus_one_name().unwrap_or_default().to_string(),
    ]
}

fn events_cell(record: &Rsvp) -> String {
    EventTag::ALL
        .into_iter()
        .filter(|event| record.attends(*event))
        .map(EventTag::label)
        .collect::<Vec<_>>()
        .join(EVENT_LABEL_SEPARATOR)
}
