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

//! In-call collaboration state: chat log, roster and the invite workflow.
//!
//! Everything here is mutated optimistically in memory and discarded with the
//! session. Mutations apply in the order they are called.

mod chat;
mod invite;
mod roster;

pub use chat::{ChatError, ChatLog};
pub use invite::{dispatch_invite, guest_name, InviteError, PendingInvite};
pub use roster::{Roster, RosterError};

use log::debug;
use meetroom_types::{ChatMessage, FileAttachment, Invitation, Participant};

use crate::config::CallConfig;
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;

#[derive(Debug, Clone)]
pub struct Collaboration {
    display_name: String,
    max_attachment_bytes: Option<u64>,
    chat: ChatLog,
    roster: Roster,
}

impl Collaboration {
    pub fn new(display_name: &str, config: &CallConfig) -> Self {
        let mut roster = Roster::with_self(display_name);
        roster.sync_self(config.mic_on_join, config.camera_on_join);
        Self {
            display_name: display_name.to_string(),
            max_attachment_bytes: config.max_attachment_bytes,
            chat: ChatLog::new(),
            roster,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn send_chat_message(&mut self, text: &str, now_ms: f64) -> Result<&ChatMessage, ChatError> {
        self.chat.send(&self.display_name, text, now_ms)
    }

    pub fn attach_file(&mut self, file: FileAttachment, now_ms: f64) -> Result<&ChatMessage, ChatError> {
        self.chat
            .attach(&self.display_name, file, self.max_attachment_bytes, now_ms)
    }

    /// Validate an invite from the local user. Nothing is written or mutated.
    pub fn prepare_invite(
        &self,
        email: &str,
        meeting_id: &str,
        meeting_title: &str,
    ) -> Result<PendingInvite, InviteError> {
        PendingInvite::new(email, meeting_id, meeting_title, &self.display_name)
    }

    /// Add the invited guest and record the invite in the chat.
    pub fn complete_invite(&mut self, invitation: &Invitation, now_ms: f64) -> Participant {
        let guest = self
            .roster
            .add_guest(guest_name(&invitation.to_email))
            .clone();
        self.narrate(format!("Invitation sent to {}", invitation.to_email), now_ms);
        emit_client_event(ClientEvent::ParticipantJoined(guest.id.clone()));
        guest
    }

    /// Exclude a participant. The local participant cannot be removed.
    pub fn remove_participant(&mut self, id: &str, now_ms: f64) -> Result<Participant, RosterError> {
        let removed = self.roster.remove(id)?;
        self.narrate(format!("{} was removed from the meeting", removed.name), now_ms);
        emit_client_event(ClientEvent::ParticipantRemoved(removed.id.clone()));
        Ok(removed)
    }

    /// Visual-only; there is no remote audio to mute.
    pub fn toggle_participant_mute(&mut self, id: &str) -> Result<bool, RosterError> {
        self.roster.toggle_mute(id)
    }

    pub(crate) fn narrate(&mut self, text: String, now_ms: f64) {
        debug!("system message: {text}");
        self.chat.push_system(text, now_ms);
    }

    pub(crate) fn sync_self(&mut self, mic_enabled: bool, camera_enabled: bool) {
        self.roster.sync_self(mic_enabled, camera_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetroom_types::MessageKind;

    fn collab() -> Collaboration {
        Collaboration::new("Alice", &CallConfig::default())
    }

    fn invitation(to: &str) -> Invitation {
        Invitation {
            id: "inv1".into(),
            meeting_id: "m".into(),
            meeting_title: "t".into(),
            from_name: "Alice".into(),
            to_email: to.into(),
            timestamp: 0.0,
        }
    }

    #[test]
    fn blank_messages_leave_the_log_unchanged() {
        let mut c = collab();
        assert_eq!(c.send_chat_message("", 0.0), Err(ChatError::Empty));
        assert_eq!(c.send_chat_message("   ", 0.0), Err(ChatError::Empty));
        assert!(c.chat().is_empty());

        let msg = c.send_chat_message("hello", 42.0).unwrap().clone();
        assert_eq!(c.chat().len(), 1);
        assert!(msg.is_me);
        assert_eq!(msg.kind, MessageKind::Chat);
        assert_eq!(msg.timestamp, 42.0);
    }

    #[test]
    fn attachments_are_unbounded_by_default() {
        let mut c = collab();
        let file = FileAttachment {
            name: "huge.iso".into(),
            handle: "blob:1".into(),
            size_bytes: 8 * 1024 * 1024 * 1024,
            mime_type: "application/octet-stream".into(),
        };
        assert!(c.attach_file(file, 0.0).is_ok());
    }

    #[test]
    fn configured_cap_rejects_large_attachments() {
        let config = CallConfig {
            max_attachment_bytes: Some(1024),
            ..CallConfig::default()
        };
        let mut c = Collaboration::new("Alice", &config);
        let file = FileAttachment {
            name: "big.bin".into(),
            handle: "blob:1".into(),
            size_bytes: 2048,
            mime_type: "application/octet-stream".into(),
        };
        assert_eq!(
            c.attach_file(file, 0.0),
            Err(ChatError::AttachmentTooLarge {
                size: 2048,
                limit: 1024
            })
        );
        assert!(c.chat().is_empty());
    }

    #[test]
    fn rejected_invite_changes_nothing() {
        let c = collab();
        assert!(c.prepare_invite("not-an-email", "m", "t").is_err());
        assert_eq!(c.roster().len(), 1);
        assert!(c.chat().is_empty());
    }

    #[test]
    fn completed_invite_adds_guest_and_narrates() {
        let mut c = collab();
        let guest = c.complete_invite(&invitation("bob@x.com"), 0.0);
        assert_eq!(c.roster().len(), 2);
        assert!(guest.is_muted && !guest.is_cam_on);
        let last = c.chat().last().unwrap();
        assert!(last.is_system());
        assert!(last.text.as_deref().unwrap().contains("bob@x.com"));
    }

    #[test]
    fn concurrent_invites_are_not_deduplicated() {
        let mut c = collab();
        let a = c.complete_invite(&invitation("bob@x.com"), 0.0);
        let b = c.complete_invite(&invitation("bob@x.com"), 0.0);
        assert_ne!(a.id, b.id);
        assert_eq!(c.roster().len(), 3);
    }

    #[test]
    fn self_cannot_be_removed_or_muted() {
        let mut c = collab();
        let me = c.roster().me().unwrap().id.clone();
        assert_eq!(c.remove_participant(&me, 0.0), Err(RosterError::IsSelf));
        assert_eq!(c.toggle_participant_mute(&me), Err(RosterError::IsSelf));
        assert_eq!(
            c.remove_participant("ghost", 0.0),
            Err(RosterError::NotFound("ghost".into()))
        );
        assert!(c.chat().is_empty());
    }

    #[test]
    fn removal_narrates_the_name() {
        let mut c = collab();
        let guest = c.complete_invite(&invitation("carol@x.com"), 0.0);
        assert!(c.toggle_participant_mute(&guest.id).is_ok());
        let removed = c.remove_participant(&guest.id, 1.0).unwrap();
        assert_eq!(removed.name, "carol (Guest)");
        assert_eq!(c.roster().len(), 1);
        assert_eq!(
            c.chat().last().unwrap().text.as_deref(),
            Some("carol (Guest) was removed from the meeting")
        );
    }
}
