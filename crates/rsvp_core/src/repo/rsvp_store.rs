//! Store contract and error taxonomy.

use crate::db::DbError;
use crate::model::rsvp::{Rsvp, RsvpId, RsvpValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store failure for RSVP persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Transient infrastructure fault. Callers may retry; core never does.
    Unavailable(Box<dyn Error + Send + Sync + 'static>),
    /// Insert attempted with an identifier that already exists.
    DuplicateId(RsvpId),
    /// Persisted row no longer satisfies record invariants.
    InvalidData(String),
    /// Permanent database fault such as schema drift or a rejected statement.
    Database(DbError),
}

impl StoreError {
    /// Returns whether the failure is the retryable `StoreUnavailable` kind.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "rsvp store unavailable: {err}"),
            Self::DuplicateId(id) => write!(f, "rsvp id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted rsvp data: {message}"),
            Self::Database(err) => write!(f, "rsvp store failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err.as_ref()),
            Self::Database(err) => Some(err),
            Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        if value.is_transient() {
            Self::Unavailable(Box::new(value))
        } else {
            Self::Database(value)
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        DbError::from(value).into()
    }
}

impl From<RsvpValidationError> for StoreError {
    fn from(value: RsvpValidationError) -> Self {
        Self::InvalidData(format!("stored record violates `{}`", value.code()))
    }
}

/// Persistence contract consumed by Intake and Aggregator.
///
/// Both operations are atomic with respect to a single record.
pub trait RsvpStore {
    /// Persists one record and returns it as stored.
    fn insert(&self, record: &Rsvp) -> StoreResult<Rsvp>;

    /// Returns a snapshot of all records in deterministic order.
    fn scan_all(&self) -> StoreResult<Vec<Rsvp>>;
}

impl<S: RsvpStore + ?Sized> RsvpStore for &S {
    fn insert(&self, record: &Rsvp) -> StoreResult<Rsvp> {
        (**self).insert(record)
    }

    fn scan_all(&self) -> StoreResult<Vec<Rsvp>> {
        (**self).scan_all()
    }
}

#[cfg(test)]
mod tests {
    use super::StoreError;
    use crate::db::DbError;
    use rusqlite::ffi;
    use std::error::Error;

    #[test]
    fn transient_db_faults_become_unavailable() {
        let busy = rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_BUSY), None);
        let unavailable = StoreError::from(busy);
        assert!(unavailable.is_unavailable());
        assert!(unavailable.source().is_some());
    }

    #[test]
    fn permanent_db_faults_are_not_retryable() {
        let drifted = StoreError::from(DbError::MissingRequiredTable("rsvps"));
        assert!(matches!(
            drifted,
            StoreError::Database(DbError::MissingRequiredTable("rsvps"))
        ));
        assert!(!drifted.is_unavailable());
        assert!(!StoreError::InvalidData("bad".to_string()).is_unavailable());
    }
}
