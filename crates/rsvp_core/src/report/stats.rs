//! Summary counters shown on the admin dashboard.

use crate::model::rsvp::{EventTag, Rsvp};
use serde::{Deserialize, Serialize};

/// Aggregated attendance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpStats {
    /// Number of responses.
    pub total_rsvps: u64,
    /// Attendees including companions (solo = 1, plus one = 2).
    pub total_guests: u64,
    /// Responses that include the reception.
    pub reception_count: u64,
    /// Responses that include the muhurtham.
    pub muhurtham_count: u64,
}

impl RsvpStats {
    /// Reduces a record set into counters.
    ///
    /// A response attending both events counts once in `total_rsvps` and
    /// once in each event counter.
    pub fn from_records(records: &[Rsvp]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.add(record);
            stats
        })
    }

    fn add(&mut self, record: &Rsvp) {
        self.total_rsvps += 1;
        self.total_guests += record.headcount();
        if record.attends(EventTag::Reception) {
            self.reception_count += 1;
        }
        if record.attends(EventTag::Muhurtham) {
            self.muhurtham_count += 1;
        }
    }
}
