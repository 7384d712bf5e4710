use rsvp_core::db::open_db_in_memory;
use rsvp_core::{
    EventTag, GuestStatus, InMemoryRsvpStore, IntakeError, Rsvp, RsvpAggregator, RsvpIntake,
    RsvpStore, RsvpSubmission, RsvpValidationError, SqliteRsvpStore, StoreError, StoreResult,
};
use std::collections::HashSet;
use std::thread;

fn submission(
    name: &str,
    events: &[&str],
    status: &str,
    plus_one: Option<&str>,
) -> RsvpSubmission {
    RsvpSubmission {
        full_name: name.to_string(),
        attending_events: events.iter().map(|value| value.to_string()).collect(),
        guest_status: status.to_string(),
        plus_one_name: plus_one.map(str::to_string),
    }
}

struct UnavailableStore;

impl RsvpStore for UnavailableStore {
    fn insert(&self, _record: &Rsvp) -> StoreResult<Rsvp> {
        Err(StoreError::Unavailable("disk detached".into()))
    }

    fn scan_all(&self) -> StoreResult<Vec<Rsvp>> {
        Err(StoreError::Unavailable("disk detached".into()))
    }
}

#[test]
fn solo_submission_is_persisted_once_and_counted() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);
    let aggregator = RsvpAggregator::new(&store);

    let created = intake
        .submit(&submission("Asha Rao", &["muhurtham"], "solo", None))
        .unwrap();
    assert_eq!(created.full_name(), "Asha Rao");
    assert_eq!(created.guest(), &GuestStatus::Solo);
    assert_eq!(created.plus_one_name(), None);

    let listing = aggregator.list_rsvps().unwrap();
    assert_eq!(listing, vec![created]);

    let stats = aggregator.stats().unwrap();
    assert_eq!(stats.muhurtham_count, 1);
    assert_eq!(stats.reception_count, 0);
    assert_eq!(stats.total_guests, 1);
    assert_eq!(stats.total_rsvps, 1);
}

#[test]
fn solo_submission_drops_supplied_plus_one_name() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);

    for supplied in [Some("Ravi"), Some(""), Some("   "), None] {
        let created = intake
            .submit(&submission("Asha", &["reception"], "solo", supplied))
            .unwrap();
        assert_eq!(created.plus_one_name(), None);
    }
    assert!(store
        .scan_all()
        .unwrap()
        .iter()
        .all(|record| record.plus_one_name().is_none()));
}

#[test]
fn blank_name_is_rejected_without_persisting() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);

    let err = intake
        .submit(&submission("", &["reception"], "solo", None))
        .unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Validation(RsvpValidationError::MissingName)
    ));
    assert!(!err.is_retryable());
    assert!(store.is_empty().unwrap());

    let stats = RsvpAggregator::new(&store).stats().unwrap();
    assert_eq!(stats.total_rsvps, 0);
    assert_eq!(stats.total_guests, 0);
}

#[test]
fn plus_one_without_companion_name_is_rejected() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);

    for supplied in [None, Some(""), Some(" \t ")] {
        let err = intake
            .submit(&submission("Asha", &["reception"], "plus_one", supplied))
            .unwrap_err();
        assert!(matches!(
            err,
            IntakeError::Validation(RsvpValidationError::MissingPlusOneName)
        ));
    }
    assert!(store.is_empty().unwrap());
}

#[test]
fn empty_event_selection_is_rejected() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);

    let err = intake
        .submit(&submission("Asha", &[], "plus_one", Some("Ravi")))
        .unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Validation(RsvpValidationError::NoEventSelected)
    ));
    assert!(store.is_empty().unwrap());
}

#[test]
fn out_of_enumeration_values_are_rejected() {
    let store = InMemoryRsvpStore::new();
    let intake = RsvpIntake::new(&store);

    let err = intake
        .submit(&submission("Asha", &["haldi"], "solo", None))
        .unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Validation(RsvpValidationError::NoEventSelected)
    ));

    let err = intake
        .submit(&submission("Asha", &["reception"], "family", None))
        .unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Validation(RsvpValidationError::InvalidGuestStatus)
    ));
    assert!(store.is_empty().unwrap());
}

#[test]
fn plus_one_submission_keeps_trimmed_companion() {
    let store = InMemoryRsvpStore::new();
    let created = RsvpIntake::new(&store)
        .submit(&submission(
            "Asha",
            &["muhurtham", "reception", "reception"],
            "plus_one",
            Some("  Ravi Rao "),
        ))
        .unwrap();

    assert_eq!(created.plus_one_name(), Some("Ravi Rao"));
    assert_eq!(created.headcount(), 2);
    assert_eq!(
        created.attending_events().iter().copied().collect::<Vec<_>>(),
        vec![EventTag::Reception, EventTag::Muhurtham]
    );
}

#[test]
fn store_failure_is_retryable_and_surfaced() {
    let intake = RsvpIntake::new(UnavailableStore);
    let err = intake
        .submit(&submission("Asha", &["reception"], "solo", None))
        .unwrap_err();
    assert!(matches!(err, IntakeError::Store(StoreError::Unavailable(_))));
    assert!(err.is_retryable());
}

#[test]
fn validation_runs_before_store_is_touched() {
    let intake = RsvpIntake::new(UnavailableStore);
    let err = intake
        .submit(&submission(" ", &["reception"], "solo", None))
        .unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Validation(RsvpValidationError::MissingName)
    ));
}

#[test]
fn sqlite_intake_round_trips_created_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRsvpStore::try_new(&conn).unwrap();
    let intake = RsvpIntake::new(&store);

    let created = intake
        .submit(&submission(
            "O'Brien, Jr.",
            &["reception"],
            "plus_one",
            Some("Maeve"),
        ))
        .unwrap();

    let listed = RsvpAggregator::new(&store).list_rsvps().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn concurrent_intake_assigns_unique_ids() {
    let store = InMemoryRsvpStore::new();
    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let intake = RsvpIntake::new(store.clone());
            thread::spawn(move || {
                (0..25)
                    .map(|index| {
                        intake
                            .submit(&submission(
                                &format!("guest {worker}-{index}"),
                                &["reception"],
                                "solo",
                                None,
                            ))
                            .unwrap()
                            .id()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<_> = workers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(store.len().unwrap(), 200);
}
