//! `wedding-rsvp submit`: guest intake.

use super::CommandError;
use rsvp_core::db::open_db;
use rsvp_core::{RsvpIntake, RsvpSubmission, SqliteRsvpStore};
use std::path::PathBuf;

/// Configuration for the submit command.
pub struct SubmitConfig {
    pub db_path: PathBuf,
    pub submission: RsvpSubmission,
}

/// Validates and stores one submission, printing the created record as JSON.
pub fn run(config: &SubmitConfig) -> Result<(), CommandError> {
    // Reject before touching the database file.
    config
        .submission
        .validate()
        .map_err(CommandError::Rejected)?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteRsvpStore::try_new(&conn)?;
    let created = RsvpIntake::new(&store).submit(&config.submission)?;

    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}
