//! Admin commands: `list`, `stats` and `export`.
//!
//! Every entry point takes an `AdminAccess`, so none of them can be
//! reached without passing the gate first.

use super::CommandError;
use crate::gate::AdminAccess;
use rsvp_core::db::open_db;
use rsvp_core::{RsvpAggregator, SqliteRsvpStore};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output target meaning "write to stdout".
pub const STDOUT_TARGET: &str = "-";

/// Prints every RSVP as a JSON array.
pub fn list(_access: &AdminAccess, db_path: &Path) -> Result<(), CommandError> {
    let conn = open_db(db_path)?;
    let store = SqliteRsvpStore::try_new(&conn)?;
    let rsvps = RsvpAggregator::new(&store).list_rsvps()?;

    println!("{}", serde_json::to_string_pretty(&rsvps)?);
    Ok(())
}

/// Prints the summary counters as JSON.
pub fn stats(_access: &AdminAccess, db_path: &Path) -> Result<(), CommandError> {
    let conn = open_db(db_path)?;
    let store = SqliteRsvpStore::try_new(&conn)?;
    let stats = RsvpAggregator::new(&store).stats()?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

/// Configuration for the export command.
pub struct ExportConfig {
    pub db_path: PathBuf,
    /// Destination file; `None` uses the suggested filename, `-` is stdout.
    pub out: Option<PathBuf>,
}

/// Writes the CSV export.
pub fn export(_access: &AdminAccess, config: &ExportConfig) -> Result<(), CommandError> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteRsvpStore::try_new(&conn)?;
    let export = RsvpAggregator::new(&store).export_csv()?;

    let target = config
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(export.filename));

    if target.as_os_str() == STDOUT_TARGET {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&export.bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    std::fs::write(&target, &export.bytes)?;
    eprintln!(
        "wrote {} bytes ({}) to {}",
        export.bytes.len(),
        export.content_type,
        target.display()
    );
    Ok(())
}
