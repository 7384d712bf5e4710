//! RSVP intake use case.
//!
//! # Responsibility
//! - Validate one guest submission and persist it as a new record.
//!
//! # Invariants
//! - Exactly one store insertion per successful call, none on failure.
//! - Validation rejections are guest errors and never logged as faults.
//! - No retry on store failure; retry policy belongs to the caller.

use crate::model::rsvp::{Rsvp, RsvpSubmission, RsvpValidationError};
use crate::repo::rsvp_store::{RsvpStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Failure of a single intake call.
#[derive(Debug)]
pub enum IntakeError {
    /// Caller-correctable submission problem.
    Validation(RsvpValidationError),
    /// Persistence failure.
    Store(StoreError),
}

impl IntakeError {
    /// Returns whether the caller may retry the same submission.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_unavailable())
    }
}

impl Display for IntakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntakeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RsvpValidationError> for IntakeError {
    fn from(value: RsvpValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for IntakeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Validate-and-persist entry point for guest submissions.
pub struct RsvpIntake<S: RsvpStore> {
    store: S,
}

impl<S: RsvpStore> RsvpIntake<S> {
    /// Creates an intake service writing into `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates `submission`, assigns id and timestamp, and persists it.
    ///
    /// # Contract
    /// - Rules are applied in order and the first violation is returned.
    /// - A `plus_one_name` supplied with `solo` is dropped silently.
    /// - Returns the record as stored.
    pub fn submit(&self, submission: &RsvpSubmission) -> Result<Rsvp, IntakeError> {
        let started_at = Instant::now();

        let draft = match submission.validate() {
            Ok(draft) => draft,
            Err(err) => {
                info!(
                    "event=rsvp_create module=intake status=rejected reason={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        let record = Rsvp::new(draft);
        match self.store.insert(&record) {
            Ok(stored) => {
                info!(
                    "event=rsvp_create module=intake status=ok rsvp_id={} guest_status={} event_count={} duration_ms={}",
                    stored.id(),
                    stored.guest().as_str(),
                    stored.attending_events().len(),
                    started_at.elapsed().as_millis()
                );
                Ok(stored)
            }
            Err(err) => {
                error!(
                    "event=rsvp_create module=intake status=error rsvp_id={} retryable={} duration_ms={} error={}",
                    record.id(),
                    err.is_unavailable(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}
