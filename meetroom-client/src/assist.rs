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

//! AI assist contract and its use by the scheduler.
//!
//! Implementations never fail towards the caller: any error is logged on their
//! side and surfaces here as an empty agenda or a missing summary, which the
//! callers treat as "leave the meeting unchanged".

use async_trait::async_trait;
use log::info;
use meetroom_types::{AgendaSuggestion, Meeting, MeetingSummary};

use crate::platform;
use crate::scheduler::{MeetingBook, SchedulerError};

/// Duration hint used when the organizer gives none.
pub const DEFAULT_DURATION_HINT: &str = "1 hour";

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AiAssist {
    /// A handful of agenda lines for a meeting about `topic`.
    async fn generate_agenda(&self, topic: &str, duration_hint: &str) -> Vec<AgendaSuggestion>;

    /// Summary and action items extracted from free-form notes.
    async fn generate_summary(&self, notes: &str, participants: &[String]) -> Option<MeetingSummary>;
}

/// Stand-in used when no AI backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAssist;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AiAssist for DisabledAssist {
    async fn generate_agenda(&self, _topic: &str, _duration_hint: &str) -> Vec<AgendaSuggestion> {
        Vec::new()
    }

    async fn generate_summary(&self, _notes: &str, _participants: &[String]) -> Option<MeetingSummary> {
        None
    }
}

/// Generate an agenda from the meeting title and replace the stored one.
pub async fn suggest_agenda(
    assist: &dyn AiAssist,
    book: &MeetingBook,
    meeting_id: &str,
) -> Result<Meeting, SchedulerError> {
    let meeting = book
        .get(meeting_id)?
        .ok_or_else(|| SchedulerError::NotFound(meeting_id.to_string()))?;
    let suggestions = assist
        .generate_agenda(&meeting.title, DEFAULT_DURATION_HINT)
        .await;
    info!("{} agenda items generated for {meeting_id}", suggestions.len());
    book.apply_agenda(meeting_id, &suggestions, platform::now_ms())
}

/// Summarize the stored notes. Meetings without notes are returned unchanged
/// without calling the assistant.
pub async fn summarize_notes(
    assist: &dyn AiAssist,
    book: &MeetingBook,
    meeting_id: &str,
) -> Result<Meeting, SchedulerError> {
    let meeting = book
        .get(meeting_id)?
        .ok_or_else(|| SchedulerError::NotFound(meeting_id.to_string()))?;
    if meeting.notes.trim().is_empty() {
        return Ok(meeting);
    }
    match assist
        .generate_summary(&meeting.notes, &meeting.participants)
        .await
    {
        Some(summary) => book.apply_summary(meeting_id, &summary, platform::now_ms()),
        None => Ok(meeting),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::NewMeeting;
    use crate::store::MemoryStore;
    use futures::executor::block_on;
    use meetroom_types::ActionItem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Canned {
        summary_calls: AtomicUsize,
    }

    #[async_trait]
    impl AiAssist for Canned {
        async fn generate_agenda(&self, topic: &str, _duration_hint: &str) -> Vec<AgendaSuggestion> {
            vec![AgendaSuggestion {
                topic: format!("{topic}: goals"),
                duration: "10 min".into(),
            }]
        }

        async fn generate_summary(&self, _notes: &str, participants: &[String]) -> Option<MeetingSummary> {
            self.summary_calls.fetch_add(1, Ordering::SeqCst);
            Some(MeetingSummary {
                summary: "done".into(),
                action_items: participants
                    .iter()
                    .map(|p| ActionItem {
                        description: "follow up".into(),
                        assignee: p.clone(),
                    })
                    .collect(),
            })
        }
    }

    fn book_with_meeting() -> (MeetingBook, String) {
        let book = MeetingBook::new(Arc::new(MemoryStore::new()));
        let meeting = book
            .create(
                NewMeeting {
                    title: "Launch".into(),
                    date: "2026-10-14".into(),
                    start_time: "09:00".into(),
                    end_time: "10:00".into(),
                    participants: "ana, ben".into(),
                    ..NewMeeting::default()
                },
                1.0,
            )
            .unwrap();
        (book, meeting.id)
    }

    #[test]
    fn disabled_assist_changes_nothing() {
        let (book, id) = book_with_meeting();
        book.save_notes(&id, "notes").unwrap();
        let before = book.get(&id).unwrap();
        block_on(suggest_agenda(&DisabledAssist, &book, &id)).unwrap();
        block_on(summarize_notes(&DisabledAssist, &book, &id)).unwrap();
        assert_eq!(book.get(&id).unwrap(), before);
    }

    #[test]
    fn agenda_uses_meeting_title() {
        let (book, id) = book_with_meeting();
        let meeting = block_on(suggest_agenda(&Canned::default(), &book, &id)).unwrap();
        assert_eq!(meeting.agenda[0].topic, "Launch: goals");
    }

    #[test]
    fn empty_notes_skip_the_assistant() {
        let (book, id) = book_with_meeting();
        let assist = Canned::default();
        block_on(summarize_notes(&assist, &book, &id)).unwrap();
        assert_eq!(assist.summary_calls.load(Ordering::SeqCst), 0);

        book.save_notes(&id, "we agreed").unwrap();
        let meeting = block_on(summarize_notes(&assist, &book, &id)).unwrap();
        assert_eq!(assist.summary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(meeting.tasks.len(), 2);
        assert_eq!(meeting.tasks[1].assignee, "ben");
    }
}
