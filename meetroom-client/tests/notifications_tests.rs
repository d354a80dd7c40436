/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Notification polling over a shared store.

#![cfg(not(target_arch = "wasm32"))]

use chrono::{NaiveDate, NaiveDateTime};
use meetroom_client::store::{Collection, MeetingStoreExt, MemoryStore};
use meetroom_client::{NotificationKind, NotificationPoller};
use meetroom_types::{Invitation, Meeting, MeetingStatus};

const NOW_MS: f64 = 1_792_000_000_000.0;

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

fn meeting(id: &str, start: &str) -> Meeting {
    Meeting {
        id: id.into(),
        title: "Demo".into(),
        date: "2026-10-14".into(),
        start_time: start.into(),
        end_time: "13:00".into(),
        location: String::new(),
        participants: vec![],
        status: MeetingStatus::Scheduled,
        agenda: vec![],
        notes: String::new(),
        tasks: vec![],
    }
}

fn invitation(id: &str, to: &str, age_ms: f64) -> Invitation {
    Invitation {
        id: id.into(),
        meeting_id: "ROOM9".into(),
        meeting_title: "Demo".into(),
        from_name: "Alice".into(),
        to_email: to.into(),
        timestamp: NOW_MS - age_ms,
    }
}

#[test]
fn each_meeting_is_reminded_once() {
    let store = MemoryStore::new();
    store
        .write_collection(Collection::Meetings, &[meeting("m1", "12:05")])
        .unwrap();
    let mut poller = NotificationPoller::new("bob@x.com");

    let first = poller.scan(&store, noon(), NOW_MS).unwrap().unwrap();
    assert_eq!(first.kind, NotificationKind::Reminder);
    assert_eq!(first.meeting_id, "m1");
    assert_eq!(poller.scan(&store, noon(), NOW_MS + 5_000.0).unwrap(), None);
}

#[test]
fn invitations_respect_recipient_and_age() {
    let store = MemoryStore::new();
    store
        .write_collection(
            Collection::Invitations,
            &[
                invitation("old", "bob@x.com", 3_600_000.0),
                invitation("other", "carol@x.com", 1_000.0),
                invitation("fresh", "bob@x.com", 59.0 * 60.0 * 1000.0),
            ],
        )
        .unwrap();
    let mut poller = NotificationPoller::new("bob@x.com");

    let toast = poller.scan(&store, noon(), NOW_MS).unwrap().unwrap();
    assert_eq!(toast.kind, NotificationKind::Invite);
    assert_eq!(toast.message, "Alice invites you to: \"Demo\"");
    assert_eq!(toast.meeting_id, "ROOM9");
    assert_eq!(poller.scan(&store, noon(), NOW_MS).unwrap(), None);
}

#[test]
fn invites_are_taken_one_per_scan() {
    let store = MemoryStore::new();
    store
        .write_collection(
            Collection::Invitations,
            &[invitation("a", "bob@x.com", 10.0), invitation("b", "bob@x.com", 5.0)],
        )
        .unwrap();
    let mut poller = NotificationPoller::new("bob@x.com");
    assert!(poller.scan(&store, noon(), NOW_MS).unwrap().is_some());
    assert!(poller.scan(&store, noon(), NOW_MS).unwrap().is_some());
    assert!(poller.scan(&store, noon(), NOW_MS).unwrap().is_none());
}

#[test]
fn newer_toast_replaces_active_one() {
    let store = MemoryStore::new();
    store
        .write_collection(Collection::Meetings, &[meeting("m1", "12:03")])
        .unwrap();
    let mut poller = NotificationPoller::new("bob@x.com");
    poller.scan(&store, noon(), NOW_MS).unwrap();
    assert_eq!(poller.active().unwrap().kind, NotificationKind::Reminder);

    store
        .write_collection(Collection::Invitations, &[invitation("i1", "bob@x.com", 0.0)])
        .unwrap();
    poller.scan(&store, noon(), NOW_MS + 5_000.0).unwrap();
    assert_eq!(poller.active().unwrap().kind, NotificationKind::Invite);
}
