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

//! In-call entities. These live only as long as the call view and are never
//! written to the meeting store.

use serde::{Deserialize, Serialize};

/// Sender name used for messages generated by the session itself.
pub const SYSTEM_SENDER: &str = "System";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Host,
    Guest,
}

/// A roster entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: ParticipantRole,
    pub is_muted: bool,
    pub is_cam_on: bool,
    pub is_me: bool,
}

impl Participant {
    /// The local user's own entry.
    pub fn me(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ParticipantRole::Host,
            is_muted: false,
            is_cam_on: true,
            is_me: true,
        }
    }

    /// A placeholder guest added by an invitation: muted, camera off.
    pub fn invited_guest(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ParticipantRole::Guest,
            is_muted: true,
            is_cam_on: false,
            is_me: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Chat,
    System,
}

/// A file shared in the chat.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub name: String,
    /// Opaque content handle (an object URL in the browser, a path natively).
    pub handle: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileAttachment {
    /// Human readable size, e.g. `"12.5 KB"`.
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

/// An entry of the append-only chat log.
///
/// For [`MessageKind::Chat`] exactly one of `text` / `file` is set; system
/// messages carry `text` only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
    pub is_me: bool,
    #[serde(default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn text(id: String, sender: String, text: String, timestamp: f64, is_me: bool) -> Self {
        Self {
            id,
            sender,
            text: Some(text),
            file: None,
            timestamp,
            is_me,
            kind: MessageKind::Chat,
        }
    }

    pub fn file(id: String, sender: String, file: FileAttachment, timestamp: f64) -> Self {
        Self {
            id,
            sender,
            text: None,
            file: Some(file),
            timestamp,
            is_me: true,
            kind: MessageKind::Chat,
        }
    }

    pub fn system(id: String, text: String, timestamp: f64) -> Self {
        Self {
            id,
            sender: SYSTEM_SENDER.to_string(),
            text: Some(text),
            file: None,
            timestamp,
            is_me: true,
            kind: MessageKind::System,
        }
    }

    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Checks the text/file exclusivity rule for the message kind.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            MessageKind::Chat => self.text.is_some() != self.file.is_some(),
            MessageKind::System => self.text.is_some() && self.file.is_none(),
        }
    }
}
