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
 */

//! Shared types for the meetroom meeting client.
//!
//! This crate defines the records kept in the meeting store (meetings, users,
//! invitations, friend requests), the in-call entities (participants and chat
//! messages) and the shapes exchanged with the AI assist service.
//! It is intentionally framework-agnostic: no browser types, no storage types.

pub mod ai;
pub mod call;
pub mod records;

pub use ai::{ActionItem, AgendaSuggestion, MeetingSummary};
pub use call::{ChatMessage, FileAttachment, MessageKind, Participant, ParticipantRole};
pub use records::{
    AgendaItem, FriendRequest, FriendRequestStatus, Invitation, Meeting, MeetingStatus, Task,
    TaskStatus, User,
};
