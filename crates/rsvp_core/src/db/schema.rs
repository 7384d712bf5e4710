//! Shape of the `rsvps` table that the store reads and writes.

use super::migrations::{latest_version, schema_version};
use super::{DbError, DbResult};
use rusqlite::Connection;

pub const RSVPS_TABLE: &str = "rsvps";

/// Index backing the listing order `created_at, seq`.
pub const RSVPS_ORDER_INDEX: &str = "idx_rsvps_created_at";

const RSVPS_COLUMNS: &[&str] = &[
    "seq",
    "id",
    "full_name",
    "attending_events",
    "guest_status",
    "plus_one_name",
    "created_at",
];

/// Verifies that `conn` is migrated and carries every `rsvps` column.
///
/// # Errors
/// - `UninitializedConnection` when the schema version is not the latest.
/// - `MissingRequiredTable` / `MissingRequiredColumn` for a drifted table.
pub fn check_rsvps_schema(conn: &Connection) -> DbResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let columns = table_columns(conn, RSVPS_TABLE)?;
    if columns.is_empty() {
        return Err(DbError::MissingRequiredTable(RSVPS_TABLE));
    }
    let missing = RSVPS_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|column| column == required));
    if let Some(column) = missing {
        return Err(DbError::MissingRequiredColumn {
            table: RSVPS_TABLE,
            column,
        });
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
