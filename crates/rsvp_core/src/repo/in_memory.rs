//! In-memory RSVP store for tests and embedding.

use crate::model::rsvp::Rsvp;
use crate::repo::rsvp_store::{RsvpStore, StoreError, StoreResult};
use std::sync::{Arc, RwLock};

/// Vec-backed store, clone-friendly via `Arc`.
///
/// Insertion order is kept; `scan_all` stable-sorts by timestamp so equal
/// instants stay in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRsvpStore {
    records: Arc<RwLock<Vec<Rsvp>>>,
}

impl InMemoryRsvpStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> StoreResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("rsvp store lock poisoned".into()))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RsvpStore for InMemoryRsvpStore {
    fn insert(&self, record: &Rsvp) -> StoreResult<Rsvp> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("rsvp store lock poisoned".into()))?;

        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::DuplicateId(record.id()));
        }

        records.push(record.clone());
        Ok(record.clone())
    }

    fn scan_all(&self) -> StoreResult<Vec<Rsvp>> {
        let mut snapshot = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("rsvp store lock poisoned".into()))?
            .clone();
        snapshot.sort_by_key(Rsvp::timestamp);
        Ok(snapshot)
    }
}
