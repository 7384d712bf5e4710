//! RSVP record, enumerations and submission validation.
//!
//! # Responsibility
//! - Define the immutable record written once per accepted submission.
//! - Apply intake validation rules in a fixed, fail-fast order.
//!
//! # Invariants
//! - `attending_events` is never empty and holds no duplicates.
//! - A plus-one name exists exactly when the guest status is `plus_one`;
//!   this is carried by `GuestStatus` rather than checked at runtime.
//! - `timestamp` has millisecond precision so every persisted form
//!   round-trips to the same instant.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one RSVP record.
pub type RsvpId = Uuid;

/// Wire value for the reception event.
pub const EVENT_RECEPTION: &str = "reception";
/// Wire value for the muhurtham ceremony.
pub const EVENT_MUHURTHAM: &str = "muhurtham";
/// Wire value for a guest coming alone.
pub const GUEST_STATUS_SOLO: &str = "solo";
/// Wire value for a guest bringing a named companion.
pub const GUEST_STATUS_PLUS_ONE: &str = "plus_one";

/// Wedding event a guest can attend.
///
/// Variant order is the canonical display order: reception first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTag {
    Reception,
    Muhurtham,
}

impl EventTag {
    /// All event tags in canonical order.
    pub const ALL: [EventTag; 2] = [EventTag::Reception, EventTag::Muhurtham];

    /// Stable wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reception => EVENT_RECEPTION,
            Self::Muhurtham => EVENT_MUHURTHAM,
        }
    }

    /// Title-cased label used by reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reception => "Reception",
            Self::Muhurtham => "Muhurtham",
        }
    }

    /// Parses an exact wire string. Case and whitespace variants are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            EVENT_RECEPTION => Some(Self::Reception),
            EVENT_MUHURTHAM => Some(Self::Muhurtham),
            _ => None,
        }
    }
}

impl Display for EventTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance mode of the primary guest.
///
/// Serialized with a `guest_status` tag so that a flattened record keeps
/// the `guest_status` / `plus_one_name` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "guest_status", rename_all = "snake_case")]
pub enum GuestStatus {
    Solo,
    PlusOne {
        #[serde(rename = "plus_one_name")]
        name: String,
    },
}

impl GuestStatus {
    /// Stable wire tag (`solo` or `plus_one`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => GUEST_STATUS_SOLO,
            Self::PlusOne { .. } => GUEST_STATUS_PLUS_ONE,
        }
    }

    /// Companion name, present only for `PlusOne`.
    pub fn plus_one_name(&self) -> Option<&str> {
        match self {
            Self::Solo => None,
            Self::PlusOne { name } => Some(name.as_str()),
        }
    }

    /// Number of attendees this response accounts for.
    pub fn headcount(&self) -> u64 {
        match self {
            Self::Solo => 1,
            Self::PlusOne { .. } => 2,
        }
    }

    /// Human-readable status used by reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::PlusOne { .. } => "With Guest",
        }
    }
}

/// Validation failures for a guest submission.
///
/// These are caller-correctable and are surfaced verbatim to the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpValidationError {
    MissingName,
    NoEventSelected,
    InvalidGuestStatus,
    MissingPlusOneName,
}

impl RsvpValidationError {
    /// Stable machine-readable reason code.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::NoEventSelected => "no_event_selected",
            Self::InvalidGuestStatus => "invalid_guest_status",
            Self::MissingPlusOneName => "missing_plus_one_name",
        }
    }

    /// Guest-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingName => "Please enter your full name",
            Self::NoEventSelected => "Please select at least one event to attend",
            Self::InvalidGuestStatus => "Guest status must be `solo` or `plus_one`",
            Self::MissingPlusOneName => "Please enter your guest's name",
        }
    }
}

impl Display for RsvpValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for RsvpValidationError {}

/// Raw submission payload as received from a guest.
///
/// Every field is kept as free text so that out-of-enumeration values are
/// rejected by `validate()` rather than lost during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSubmission {
    pub full_name: String,
    #[serde(default)]
    pub attending_events: Vec<String>,
    pub guest_status: String,
    #[serde(default)]
    pub plus_one_name: Option<String>,
}

impl RsvpSubmission {
    /// Applies intake rules in order and stops at the first violation.
    ///
    /// 1. trimmed `full_name` is non-empty
    /// 2. `attending_events` is a non-empty subset of the event enumeration
    /// 3. `guest_status` is `solo` or `plus_one`
    /// 4. `plus_one` requires a trimmed non-empty `plus_one_name`
    ///
    /// A `plus_one_name` sent together with `solo` is discarded.
    pub fn validate(&self) -> Result<ValidatedRsvp, RsvpValidationError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(RsvpValidationError::MissingName);
        }

        let attending_events = parse_event_set(&self.attending_events)?;

        let guest = match self.guest_status.as_str() {
            GUEST_STATUS_SOLO => GuestStatus::Solo,
            GUEST_STATUS_PLUS_ONE => {
                let name = self.plus_one_name.as_deref().map(str::trim).unwrap_or("");
                if name.is_empty() {
                    return Err(RsvpValidationError::MissingPlusOneName);
                }
                GuestStatus::PlusOne {
                    name: name.to_string(),
                }
            }
            _ => return Err(RsvpValidationError::InvalidGuestStatus),
        };

        Ok(ValidatedRsvp {
            full_name: full_name.to_string(),
            attending_events,
            guest,
        })
    }
}

fn parse_event_set(values: &[String]) -> Result<BTreeSet<EventTag>, RsvpValidationError> {
    let mut events = BTreeSet::new();
    for value in values {
        let tag = EventTag::parse(value).ok_or(RsvpValidationError::NoEventSelected)?;
        events.insert(tag);
    }
    if events.is_empty() {
        return Err(RsvpValidationError::NoEventSelected);
    }
    Ok(events)
}

/// Submission that passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRsvp {
    full_name: String,
    attending_events: BTreeSet<EventTag>,
    guest: GuestStatus,
}

impl ValidatedRsvp {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn attending_events(&self) -> &BTreeSet<EventTag> {
        &self.attending_events
    }

    pub fn guest(&self) -> &GuestStatus {
        &self.guest
    }
}

/// Canonical persisted RSVP record.
///
/// Fields are private: a record is either created from a `ValidatedRsvp`
/// or restored from storage through `Rsvp::restore`, which re-checks every
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rsvp {
    id: RsvpId,
    full_name: String,
    attending_events: BTreeSet<EventTag>,
    #[serde(flatten)]
    guest: GuestStatus,
    timestamp: DateTime<Utc>,
}

impl Rsvp {
    /// Creates a record with a fresh v4 id stamped with the current instant.
    pub fn new(draft: ValidatedRsvp) -> Self {
        Self::with_id(Uuid::new_v4(), Utc::now(), draft)
    }

    /// Creates a record with caller-provided identity and creation instant.
    ///
    /// Used by import paths and tests that need a fixed ordering. The
    /// instant is truncated to millisecond precision.
    pub fn with_id(id: RsvpId, timestamp: DateTime<Utc>, draft: ValidatedRsvp) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            attending_events: draft.attending_events,
            guest: draft.guest,
            timestamp: timestamp.trunc_subsecs(3),
        }
    }

    /// Rebuilds a record read back from storage.
    ///
    /// # Errors
    /// Returns the first violated invariant, using the same reasons intake
    /// would have reported.
    pub fn restore(
        id: RsvpId,
        full_name: String,
        attending_events: BTreeSet<EventTag>,
        guest: GuestStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, RsvpValidationError> {
        if full_name.trim().is_empty() {
            return Err(RsvpValidationError::MissingName);
        }
        if attending_events.is_empty() {
            return Err(RsvpValidationError::NoEventSelected);
        }
        if let GuestStatus::PlusOne { name } = &guest {
            if name.trim().is_empty() {
                return Err(RsvpValidationError::MissingPlusOneName);
            }
        }

        Ok(Self {
            id,
            full_name,
            attending_events,
            guest,
            timestamp: timestamp.trunc_subsecs(3),
        })
    }

    pub fn id(&self) -> RsvpId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Attended events in canonical order.
    pub fn attending_events(&self) -> &BTreeSet<EventTag> {
        &self.attending_events
    }

    pub fn guest(&self) -> &GuestStatus {
        &self.guest
    }

    pub fn plus_one_name(&self) -> Option<&str> {
        self.guest.plus_one_name()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether this guest attends `event`.
    pub fn attends(&self, event: EventTag) -> bool {
        self.attending_events.contains(&event)
    }

    /// Attendees covered by this response (1 or 2).
    pub fn headcount(&self) -> u64 {
        self.guest.headcount()
    }
}
