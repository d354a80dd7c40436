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

//! The invitation workflow.
//!
//! Validation is synchronous and happens before anything is written. The store
//! write then runs as a detached future after a simulated network delay; it
//! does not depend on the session, so an invite still lands if the call view
//! is closed in the meantime. The roster and chat are updated only when the
//! completed [`Invitation`] is handed back to the session.

use std::sync::Arc;

use log::info;
use meetroom_types::Invitation;
use thiserror::Error;

use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;
use crate::platform;
use crate::store::{Collection, MeetingStore, MeetingStoreExt, StoreError};
use crate::utils::random_id;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InviteError {
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),
}

/// An invite that passed validation and has not been sent yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvite {
    email: String,
    meeting_id: String,
    meeting_title: String,
    from_name: String,
}

impl PendingInvite {
    /// Only the presence of an `@` is checked.
    pub fn new(
        email: &str,
        meeting_id: &str,
        meeting_title: &str,
        from_name: &str,
    ) -> Result<Self, InviteError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(InviteError::InvalidEmail(email.to_string()));
        }
        Ok(Self {
            email: email.to_string(),
            meeting_id: meeting_id.to_string(),
            meeting_title: meeting_title.to_string(),
            from_name: from_name.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Wait `delay_ms`, then append the invitation to the store.
pub async fn dispatch_invite(
    pending: PendingInvite,
    store: Arc<dyn MeetingStore>,
    delay_ms: u32,
) -> Result<Invitation, StoreError> {
    platform::sleep(delay_ms).await;

    let invitation = Invitation {
        id: random_id(9),
        meeting_id: pending.meeting_id,
        meeting_title: pending.meeting_title,
        from_name: pending.from_name,
        to_email: pending.email,
        timestamp: platform::now_ms(),
    };

    let mut invitations: Vec<Invitation> = store.read_collection(Collection::Invitations)?;
    invitations.push(invitation.clone());
    store.write_collection(Collection::Invitations, &invitations)?;

    info!(
        "invitation {} sent to {} for meeting {}",
        invitation.id, invitation.to_email, invitation.meeting_id
    );
    emit_client_event(ClientEvent::InvitationSent {
        to_email: invitation.to_email.clone(),
    });
    Ok(invitation)
}

/// Roster name for an invited address: the local part plus a guest marker.
pub fn guest_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    format!("{local} (Guest)")
}
