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

use meetroom_types::{ChatMessage, FileAttachment};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    Empty,

    #[error("attachment is {size} bytes, the limit is {limit}")]
    AttachmentTooLarge { size: u64, limit: u64 },
}

/// Ordered, append-only chat log.
#[derive(Debug, Default, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("msg-{}", self.next_id)
    }

    /// Append a text message from the local user. Whitespace-only input is rejected.
    pub fn send(&mut self, sender: &str, text: &str, now_ms: f64) -> Result<&ChatMessage, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::Empty);
        }
        let id = self.next_id();
        self.messages.push(ChatMessage::text(
            id,
            sender.to_string(),
            text.to_string(),
            now_ms,
            true,
        ));
        Ok(self.tail())
    }

    /// Append a file message from the local user.
    pub fn attach(
        &mut self,
        sender: &str,
        file: FileAttachment,
        limit: Option<u64>,
        now_ms: f64,
    ) -> Result<&ChatMessage, ChatError> {
        if let Some(limit) = limit {
            if file.size_bytes > limit {
                return Err(ChatError::AttachmentTooLarge {
                    size: file.size_bytes,
                    limit,
                });
            }
        }
        let id = self.next_id();
        self.messages
            .push(ChatMessage::file(id, sender.to_string(), file, now_ms));
        Ok(self.tail())
    }

    /// System messages are only produced inside the crate, from session events.
    pub(crate) fn push_system(&mut self, text: String, now_ms: f64) -> &ChatMessage {
        let id = self.next_id();
        self.messages.push(ChatMessage::system(id, text, now_ms));
        self.tail()
    }

    // Only called right after a push.
    fn tail(&self) -> &ChatMessage {
        &self.messages[self.messages.len() - 1]
    }
}
