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

use meetroom_types::Participant;
use thiserror::Error;

use crate::constants::SELF_PARTICIPANT_ID;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("participant {0} is not in the roster")]
    NotFound(String),

    #[error("the local participant cannot be changed this way")]
    IsSelf,
}

/// The participant list, self entry first.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    next_id: u64,
}

impl Roster {
    pub fn with_self(display_name: &str) -> Self {
        Self {
            participants: vec![Participant::me(
                SELF_PARTICIPANT_ID,
                format!("{display_name} (Me)"),
            )],
            next_id: 0,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn me(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_me)
    }

    /// Mirror the local mic/camera state on the self entry.
    pub(crate) fn sync_self(&mut self, mic_enabled: bool, camera_enabled: bool) {
        if let Some(me) = self.participants.iter_mut().find(|p| p.is_me) {
            me.is_muted = !mic_enabled;
            me.is_cam_on = camera_enabled;
        }
    }

    pub(crate) fn add_guest(&mut self, name: String) -> &Participant {
        self.next_id += 1;
        self.participants
            .push(Participant::invited_guest(format!("p-{}", self.next_id), name));
        &self.participants[self.participants.len() - 1]
    }

    pub(crate) fn remove(&mut self, id: &str) -> Result<Participant, RosterError> {
        let index = self.position_of_other(id)?;
        Ok(self.participants.remove(index))
    }

    /// Visual-only mute flag for another participant. Returns the new state.
    pub fn toggle_mute(&mut self, id: &str) -> Result<bool, RosterError> {
        let index = self.position_of_other(id)?;
        let p = &mut self.participants[index];
        p.is_muted = !p.is_muted;
        Ok(p.is_muted)
    }

    fn position_of_other(&self, id: &str) -> Result<usize, RosterError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        if self.participants[index].is_me {
            return Err(RosterError::IsSelf);
        }
        Ok(index)
    }
}
