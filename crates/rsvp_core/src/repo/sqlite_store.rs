//! SQLite-backed RSVP store.
//!
//! # Responsibility
//! - Persist records into the `rsvps` table with one statement per insert.
//! - Read every record back in creation order.
//!
//! # Invariants
//! - `created_at` is stored as fixed-width RFC 3339 UTC text with
//!   millisecond precision, so text order equals time order.
//! - Read paths reject rows that break record invariants instead of
//!   masking them.

use crate::db::schema::check_rsvps_schema;
use crate::model::rsvp::{
    EventTag, GuestStatus, Rsvp, RsvpId, GUEST_STATUS_PLUS_ONE, GUEST_STATUS_SOLO,
};
use crate::repo::rsvp_store::{RsvpStore, StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::collections::BTreeSet;
use uuid::Uuid;

const EVENT_SEPARATOR: &str = ",";

const RSVP_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    attending_events,
    guest_status,
    plus_one_name,
    created_at
FROM rsvps";

/// RSVP store over a migrated SQLite connection.
pub struct SqliteRsvpStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRsvpStore<'conn> {
    /// Wraps a connection after checking its schema.
    ///
    /// # Errors
    /// - [`StoreError::Database`] wrapping the schema check failure when
    ///   migrations were not applied or `rsvps` has drifted.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        check_rsvps_schema(conn)?;
        Ok(Self { conn })
    }

    fn find(&self, id: RsvpId) -> StoreResult<Option<Rsvp>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RSVP_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_rsvp_row(row)?)),
            None => Ok(None),
        }
    }

    fn id_exists(&self, id: RsvpId) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM rsvps WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl RsvpStore for SqliteRsvpStore<'_> {
    fn insert(&self, record: &Rsvp) -> StoreResult<Rsvp> {
        let inserted = self.conn.execute(
            "INSERT INTO rsvps (
                id,
                full_name,
                attending_events,
                guest_status,
                plus_one_name,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.id().to_string(),
                record.full_name(),
                events_to_db(record.attending_events()),
                record.guest().as_str(),
                record.plus_one_name(),
                timestamp_to_db(record.timestamp()),
            ],
        );

        if let Err(err) = inserted {
            if is_constraint_violation(&err) {
                if self.id_exists(record.id())? {
                    return Err(StoreError::DuplicateId(record.id()));
                }
                return Err(StoreError::InvalidData(format!(
                    "rsvp {} rejected by table constraints: {err}",
                    record.id()
                )));
            }
            return Err(err.into());
        }

        self.find(record.id())?.ok_or_else(|| {
            StoreError::InvalidData(format!(
                "inserted rsvp {} not found in read-back",
                record.id()
            ))
        })
    }

    fn scan_all(&self) -> StoreResult<Vec<Rsvp>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RSVP_SELECT_SQL} ORDER BY created_at ASC, seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_rsvp_row(row)?);
        }

        Ok(records)
    }
}

fn parse_rsvp_row(row: &Row<'_>) -> StoreResult<Rsvp> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{id_text}` in rsvps.id")))?;

    let events_text: String = row.get("attending_events")?;
    let attending_events = parse_events(&events_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid events `{events_text}` in rsvps.attending_events"
        ))
    })?;

    let status_text: String = row.get("guest_status")?;
    let plus_one_name: Option<String> = row.get("plus_one_name")?;
    let guest = match (status_text.as_str(), plus_one_name) {
        (GUEST_STATUS_SOLO, None) => GuestStatus::Solo,
        (GUEST_STATUS_PLUS_ONE, Some(name)) => GuestStatus::PlusOne { name },
        (other, _) => {
            return Err(StoreError::InvalidData(format!(
                "guest status `{other}` inconsistent with rsvps.plus_one_name for {id}"
            )));
        }
    };

    let created_text: String = row.get("created_at")?;
    let timestamp = DateTime::parse_from_rfc3339(&created_text)
        .map_err(|_| {
            StoreError::InvalidData(format!(
                "invalid timestamp `{created_text}` in rsvps.created_at"
            ))
        })?
        .with_timezone(&Utc);

    let full_name: String = row.get("full_name")?;
    Ok(Rsvp::restore(
        id,
        full_name,
        attending_events,
        guest,
        timestamp,
    )?)
}

fn events_to_db(events: &BTreeSet<EventTag>) -> String {
    events
        .iter()
        .map(|event| event.as_str())
        .collect::<Vec<_>>()
        .join(EVENT_SEPARATOR)
}

fn parse_events(value: &str) -> Option<BTreeSet<EventTag>> {
    value.split(EVENT_SEPARATOR).map(EventTag::parse).collect()
}

fn timestamp_to_db(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::ConstraintViolation
    )
}
