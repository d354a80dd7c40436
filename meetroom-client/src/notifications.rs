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

//! Meeting reminders and invitation toasts.
//!
//! [`NotificationPoller::scan`] is meant to run every
//! [`NOTIFICATION_POLL_INTERVAL_MS`](crate::constants::NOTIFICATION_POLL_INTERVAL_MS).
//! Each meeting and each invitation raises at most one toast for the lifetime
//! of the poller. Only one toast is shown; a newer one replaces it.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use log::{debug, info};
use meetroom_types::{Invitation, Meeting};
use serde::{Deserialize, Serialize};

use crate::constants::{INVITE_MAX_AGE_MS, INVITE_TOAST_MS, REMINDER_TOAST_MS, REMINDER_WINDOW_MINUTES};
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;
use crate::store::{Collection, MeetingStore, MeetingStoreExt, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Invite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Meeting to join from the toast.
    pub meeting_id: String,
    pub expires_at_ms: f64,
}

impl Notification {
    fn reminder(meeting: &Meeting, minutes: f64, now_ms: f64) -> Self {
        Self {
            kind: NotificationKind::Reminder,
            title: "Meeting reminder".to_string(),
            message: format!("\"{}\" starts in {} minutes.", meeting.title, minutes.ceil()),
            meeting_id: meeting.id.clone(),
            expires_at_ms: now_ms + REMINDER_TOAST_MS,
        }
    }

    fn invite(invitation: &Invitation, now_ms: f64) -> Self {
        Self {
            kind: NotificationKind::Invite,
            title: "Invitation received".to_string(),
            message: format!(
                "{} invites you to: \"{}\"",
                invitation.from_name, invitation.meeting_title
            ),
            meeting_id: invitation.meeting_id.clone(),
            expires_at_ms: now_ms + INVITE_TOAST_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationPoller {
    user_email: String,
    notified_meetings: HashSet<String>,
    processed_invites: HashSet<String>,
    active: Option<Notification>,
}

impl NotificationPoller {
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            notified_meetings: HashSet::new(),
            processed_invites: HashSet::new(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&Notification> {
        self.active.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.active.take()
    }

    /// Drop the active toast once its display time is over. Returns true if one was dropped.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        if self.active.as_ref().is_some_and(|n| now_ms >= n.expires_at_ms) {
            self.active = None;
            return true;
        }
        false
    }

    /// Look for meetings about to start and fresh invitations.
    ///
    /// `now_local` is the wall clock used for meeting dates and times, which
    /// are stored without a zone. `now_ms` is epoch time for invitation age
    /// and toast expiry. Returns the toast raised by this scan, if any.
    pub fn scan(
        &mut self,
        store: &dyn MeetingStore,
        now_local: NaiveDateTime,
        now_ms: f64,
    ) -> Result<Option<Notification>, StoreError> {
        let mut raised = None;

        let meetings: Vec<Meeting> = store.read_collection(Collection::Meetings)?;
        for meeting in &meetings {
            if self.notified_meetings.contains(&meeting.id) {
                continue;
            }
            let Some(starts_at) = start_of(meeting) else {
                debug!("meeting {} has no usable start time", meeting.id);
                continue;
            };
            let minutes = (starts_at - now_local).num_milliseconds() as f64 / 60_000.0;
            if minutes > 0.0 && minutes <= REMINDER_WINDOW_MINUTES {
                self.notified_meetings.insert(meeting.id.clone());
                raised = Some(Notification::reminder(meeting, minutes, now_ms));
            }
        }

        let invitations: Vec<Invitation> = store.read_collection(Collection::Invitations)?;
        let fresh = invitations.iter().find(|inv| {
            inv.to_email == self.user_email
                && !self.processed_invites.contains(&inv.id)
                && now_ms - inv.timestamp < INVITE_MAX_AGE_MS
        });
        if let Some(invitation) = fresh {
            self.processed_invites.insert(invitation.id.clone());
            raised = Some(Notification::invite(invitation, now_ms));
        }

        if let Some(toast) = &raised {
            info!("notification for {}: {}", self.user_email, toast.message);
            self.active = Some(toast.clone());
            emit_client_event(ClientEvent::Notification(toast.clone()));
        }
        Ok(raised)
    }
}

fn start_of(meeting: &Meeting) -> Option<NaiveDateTime> {
    let stamp = format!("{}T{}", meeting.date, meeting.start_time);
    NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use meetroom_types::MeetingStatus;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    fn meeting(id: &str, start: &str) -> Meeting {
        Meeting {
            id: id.into(),
            title: format!("Meeting {id}"),
            date: "2026-10-14".into(),
            start_time: start.into(),
            end_time: "23:00".into(),
            location: String::new(),
            participants: vec![],
            status: MeetingStatus::Scheduled,
            agenda: vec![],
            notes: String::new(),
            tasks: vec![],
        }
    }

    #[test]
    fn reminder_window_is_open_at_zero_closed_at_ten() {
        let store = MemoryStore::new();
        store
            .write_collection(
                Collection::Meetings,
                &[meeting("now", "10:00"), meeting("soon", "10:10"), meeting("later", "10:11")],
            )
            .unwrap();
        let mut poller = NotificationPoller::new("me@x.com");
        let toast = poller.scan(&store, at(10, 0, 0), 0.0).unwrap().unwrap();
        assert_eq!(toast.meeting_id, "soon");
        assert_eq!(toast.message, "\"Meeting soon\" starts in 10 minutes.");
        assert_eq!(toast.expires_at_ms, REMINDER_TOAST_MS);
    }

    #[test]
    fn minutes_are_rounded_up() {
        let store = MemoryStore::new();
        store
            .write_collection(Collection::Meetings, &[meeting("a", "10:05")])
            .unwrap();
        let mut poller = NotificationPoller::new("me@x.com");
        let toast = poller.scan(&store, at(10, 0, 30), 0.0).unwrap().unwrap();
        assert!(toast.message.ends_with("starts in 5 minutes."));
    }

    #[test]
    fn malformed_start_time_is_skipped() {
        let store = MemoryStore::new();
        store
            .write_collection(Collection::Meetings, &[meeting("bad", "ten o'clock")])
            .unwrap();
        let mut poller = NotificationPoller::new("me@x.com");
        assert_eq!(poller.scan(&store, at(10, 0, 0), 0.0).unwrap(), None);
    }

    #[test]
    fn toast_expires_and_can_be_dismissed() {
        let store = MemoryStore::new();
        store
            .write_collection(Collection::Meetings, &[meeting("a", "10:05")])
            .unwrap();
        let mut poller = NotificationPoller::new("me@x.com");
        poller.scan(&store, at(10, 0, 0), 1_000.0).unwrap();
        assert!(!poller.expire(1_000.0 + REMINDER_TOAST_MS - 1.0));
        assert!(poller.expire(1_000.0 + REMINDER_TOAST_MS));
        assert!(poller.active().is_none());
        assert!(poller.dismiss().is_none());
    }
}
