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

//! Scheduled meetings: create, list, join and the AI-assisted edits.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use log::info;
use meetroom_types::{
    AgendaItem, AgendaSuggestion, Meeting, MeetingStatus, MeetingSummary, Task, TaskStatus,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Collection, MeetingStore, MeetingStoreExt, StoreError};
use crate::utils::random_code;

pub const INSTANT_MEETING_TITLE: &str = "Instant Meeting";
pub const SUMMARY_SEPARATOR: &str = "\n\n--- AI SUMMARY ---\n";

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("meeting {0} not found")]
    NotFound(String),
    #[error("meeting title is required")]
    MissingTitle,
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Form input for a new meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMeeting {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// Comma separated names or emails.
    pub participants: String,
    pub agenda: Vec<AgendaItem>,
}

/// Where a join lands: the call id and, for stored meetings, its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTarget {
    pub meeting_id: String,
    pub title: Option<String>,
}

pub struct MeetingBook {
    store: Arc<dyn MeetingStore>,
}

impl MeetingBook {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Meeting>, SchedulerError> {
        Ok(self.store.read_collection(Collection::Meetings)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<Meeting>, SchedulerError> {
        Ok(self.list()?.into_iter().find(|m| m.id == id))
    }

    /// Store a new meeting. The id is the creation time in milliseconds.
    pub fn create(&self, form: NewMeeting, now_ms: f64) -> Result<Meeting, SchedulerError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(SchedulerError::MissingTitle);
        }
        NaiveDate::parse_from_str(&form.date, "%Y-%m-%d")
            .map_err(|_| SchedulerError::InvalidDate(form.date.clone()))?;
        for time in [&form.start_time, &form.end_time] {
            NaiveTime::parse_from_str(time, "%H:%M")
                .map_err(|_| SchedulerError::InvalidTime(time.clone()))?;
        }

        let meeting = Meeting {
            id: format!("{}", now_ms as u64),
            title: title.to_string(),
            date: form.date,
            start_time: form.start_time,
            end_time: form.end_time,
            location: form.location,
            participants: form
                .participants
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            status: MeetingStatus::Scheduled,
            agenda: form.agenda,
            notes: String::new(),
            tasks: Vec::new(),
        };

        let mut meetings = self.list()?;
        meetings.push(meeting.clone());
        self.store.write_collection(Collection::Meetings, &meetings)?;
        info!("scheduled meeting {} ({})", meeting.id, meeting.title);
        Ok(meeting)
    }

    /// Replace the stored meeting with the same id.
    pub fn update(&self, meeting: Meeting) -> Result<(), SchedulerError> {
        let id = meeting.id.clone();
        self.modify(&id, move |stored| *stored = meeting)?;
        Ok(())
    }

    /// Returns whether anything was deleted.
    pub fn delete(&self, id: &str) -> Result<bool, SchedulerError> {
        let mut meetings = self.list()?;
        let before = meetings.len();
        meetings.retain(|m| m.id != id);
        if meetings.len() == before {
            return Ok(false);
        }
        self.store.write_collection(Collection::Meetings, &meetings)?;
        Ok(true)
    }

    /// Join by id. A stored meeting is marked active; an unknown id is still
    /// joinable and simply has no title.
    pub fn join(&self, id: &str) -> Result<JoinTarget, SchedulerError> {
        let mut meetings = self.list()?;
        let title = match meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.status = MeetingStatus::Active;
                Some(meeting.title.clone())
            }
            None => None,
        };
        if title.is_some() {
            self.store.write_collection(Collection::Meetings, &meetings)?;
        }
        Ok(JoinTarget {
            meeting_id: id.to_string(),
            title,
        })
    }

    /// A meeting that is never stored.
    pub fn start_instant(&self) -> JoinTarget {
        JoinTarget {
            meeting_id: random_code(5),
            title: Some(INSTANT_MEETING_TITLE.to_string()),
        }
    }

    pub fn toggle_agenda_item(&self, meeting_id: &str, item_id: &str) -> Result<Meeting, SchedulerError> {
        self.modify(meeting_id, |m| {
            if let Some(item) = m.agenda.iter_mut().find(|i| i.id == item_id) {
                item.completed = !item.completed;
            }
        })
    }

    pub fn toggle_task(&self, meeting_id: &str, task_id: &str) -> Result<Meeting, SchedulerError> {
        self.modify(meeting_id, |m| {
            if let Some(task) = m.tasks.iter_mut().find(|t| t.id == task_id) {
                task.status = task.status.toggled();
            }
        })
    }

    pub fn save_notes(&self, meeting_id: &str, notes: &str) -> Result<Meeting, SchedulerError> {
        self.modify(meeting_id, |m| m.notes = notes.to_string())
    }

    /// Replace the agenda with generated items. An empty suggestion list leaves it as is.
    pub fn apply_agenda(
        &self,
        meeting_id: &str,
        suggestions: &[AgendaSuggestion],
        now_ms: f64,
    ) -> Result<Meeting, SchedulerError> {
        self.modify(meeting_id, |m| {
            if !suggestions.is_empty() {
                m.agenda = agenda_from_suggestions(suggestions, now_ms);
            }
        })
    }

    /// Append the summary to the notes and its action items as pending tasks.
    pub fn apply_summary(
        &self,
        meeting_id: &str,
        summary: &MeetingSummary,
        now_ms: f64,
    ) -> Result<Meeting, SchedulerError> {
        let stamp = now_ms as u64;
        self.modify(meeting_id, |m| {
            m.notes.push_str(SUMMARY_SEPARATOR);
            m.notes.push_str(&summary.summary);
            m.tasks
                .extend(summary.action_items.iter().enumerate().map(|(i, item)| Task {
                    id: format!("ai-task-{stamp}-{i}"),
                    description: item.description.clone(),
                    assignee: item.assignee.clone(),
                    status: TaskStatus::Pending,
                }));
        })
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Meeting)) -> Result<Meeting, SchedulerError> {
        let mut meetings = self.list()?;
        let meeting = meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))?;
        change(meeting);
        let updated = meeting.clone();
        self.store.write_collection(Collection::Meetings, &meetings)?;
        Ok(updated)
    }
}

/// Turn generated suggestions into agenda items with ids `gen-{ts}-{i}`.
pub fn agenda_from_suggestions(suggestions: &[AgendaSuggestion], now_ms: f64) -> Vec<AgendaItem> {
    let stamp = now_ms as u64;
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| AgendaItem {
            id: format!("gen-{stamp}-{i}"),
            topic: s.topic.clone(),
            duration: s.duration.clone(),
            completed: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use meetroom_types::ActionItem;

    fn book() -> MeetingBook {
        MeetingBook::new(Arc::new(MemoryStore::new()))
    }

    fn form(title: &str) -> NewMeeting {
        NewMeeting {
            title: title.to_string(),
            date: "2026-10-14".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            participants: " alice@x.com, ,bob@x.com ".into(),
            ..NewMeeting::default()
        }
    }

    #[test]
    fn create_splits_participants() {
        let book = book();
        let m = book.create(form("Planning"), 1_700_000_000_123.0).unwrap();
        assert_eq!(m.id, "1700000000123");
        assert_eq!(m.participants, vec!["alice@x.com", "bob@x.com"]);
        assert_eq!(m.status, MeetingStatus::Scheduled);
        assert_eq!(book.list().unwrap().len(), 1);
    }

    #[test]
    fn create_validates_form() {
        let book = book();
        assert!(matches!(book.create(form("  "), 0.0), Err(SchedulerError::MissingTitle)));
        let mut bad = form("x");
        bad.start_time = "25:00".into();
        assert!(matches!(book.create(bad, 0.0), Err(SchedulerError::InvalidTime(_))));
        let mut bad = form("x");
        bad.date = "14/10/2026".into();
        assert!(matches!(book.create(bad, 0.0), Err(SchedulerError::InvalidDate(_))));
        assert!(book.list().unwrap().is_empty());
    }

    #[test]
    fn join_marks_stored_meeting_active() {
        let book = book();
        let m = book.create(form("Retro"), 1.0).unwrap();
        let target = book.join(&m.id).unwrap();
        assert_eq!(target.title.as_deref(), Some("Retro"));
        assert_eq!(book.get(&m.id).unwrap().unwrap().status, MeetingStatus::Active);

        let unknown = book.join("ZZZZZ").unwrap();
        assert_eq!(unknown.title, None);
        assert_eq!(book.list().unwrap().len(), 1);
    }

    #[test]
    fn instant_meeting_code_is_five_uppercase_chars() {
        let target = book().start_instant();
        assert_eq!(target.meeting_id.len(), 5);
        assert!(target
            .meeting_id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(target.title.as_deref(), Some(INSTANT_MEETING_TITLE));
    }

    #[test]
    fn summary_appends_notes_and_tasks() {
        let book = book();
        let m = book.create(form("Sync"), 1.0).unwrap();
        book.save_notes(&m.id, "raw notes").unwrap();
        let summary = MeetingSummary {
            summary: "short".into(),
            action_items: vec![ActionItem {
                description: "ship it".into(),
                assignee: "Bob".into(),
            }],
        };
        let m = book.apply_summary(&m.id, &summary, 42.0).unwrap();
        assert_eq!(m.notes, "raw notes\n\n--- AI SUMMARY ---\nshort");
        assert_eq!(m.tasks[0].id, "ai-task-42-0");
        assert_eq!(m.tasks[0].status, TaskStatus::Pending);

        let m = book.toggle_task(&m.id, "ai-task-42-0").unwrap();
        assert_eq!(m.tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn empty_agenda_suggestions_keep_agenda() {
        let book = book();
        let mut f = form("Kickoff");
        f.agenda = vec![AgendaItem {
            id: "a".into(),
            topic: "intro".into(),
            duration: "5 min".into(),
            completed: false,
        }];
        let m = book.create(f, 1.0).unwrap();
        let m = book.apply_agenda(&m.id, &[], 2.0).unwrap();
        assert_eq!(m.agenda.len(), 1);

        let m = book.toggle_agenda_item(&m.id, "a").unwrap();
        assert!(m.agenda[0].completed);

        let generated = [AgendaSuggestion {
            topic: "goals".into(),
            duration: "10 min".into(),
        }];
        let m = book.apply_agenda(&m.id, &generated, 7.0).unwrap();
        assert_eq!(m.agenda[0].id, "gen-7-0");
        assert!(!m.agenda[0].completed);
    }

    #[test]
    fn missing_meeting_is_reported() {
        assert!(matches!(
            book().toggle_task("nope", "t"),
            Err(SchedulerError::NotFound(_))
        ));
        assert!(!book().delete("nope").unwrap());
    }
}
