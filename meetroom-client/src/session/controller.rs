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

use std::future::Future;
use std::sync::Arc;

use futures::channel::mpsc;
use futures::future::LocalBoxFuture;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};
use meetroom_types::{ChatMessage, FileAttachment, Invitation, Participant};

use super::{CallSession, Device, Effect, Phase, SessionAction, SystemNotice};
use crate::collab::{dispatch_invite, ChatError, Collaboration, InviteError, RosterError};
use crate::config::CallConfig;
use crate::constants::TICK_MS;
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;
use crate::media::{MediaBackend, StreamId};
use crate::platform::{self, IntervalHandle};
use crate::store::{MeetingStore, StoreError};

/// A pending device request. Resolves to the action to dispatch next.
pub type MediaRequest = LocalBoxFuture<'static, SessionAction>;

/// Runs a [`CallSession`] against a media backend and owns the in-call
/// collaboration state.
///
/// Device acquisition is the only asynchronous step. [`dispatch`](Self::dispatch)
/// hands it back to the caller as a [`MediaRequest`] so no borrow of the
/// controller is held while the user answers a permission prompt. Hosts that
/// own the controller outright can use [`apply`](Self::apply) instead.
///
/// Invitations written by [`invite`](Self::invite) come back on a channel and
/// are added to the roster on the next dispatch (or [`drain_invites`](Self::drain_invites)).
///
/// Dropping the controller leaves the call.
pub struct SessionController<M: MediaBackend> {
    session: CallSession,
    media: M,
    collab: Collaboration,
    config: CallConfig,
    invites_tx: mpsc::UnboundedSender<Invitation>,
    invites_rx: mpsc::UnboundedReceiver<Invitation>,
}

impl<M: MediaBackend> SessionController<M> {
    pub fn new(
        meeting_id: &str,
        meeting_title: &str,
        display_name: &str,
        media: M,
        config: CallConfig,
    ) -> Self {
        info!("opening call view for meeting {meeting_id}");
        let (invites_tx, invites_rx) = mpsc::unbounded();
        Self {
            session: CallSession::new(meeting_id, meeting_title, &config),
            media,
            collab: Collaboration::new(display_name, &config),
            config,
            invites_tx,
            invites_rx,
        }
    }

    pub fn session(&self) -> &CallSession {
        &self.session
    }

    pub fn collaboration(&self) -> &Collaboration {
        &self.collab
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn config(&self) -> &CallConfig {
        &self.config
    }

    pub fn elapsed_display(&self) -> String {
        self.session.elapsed_display()
    }

    /// The stream currently routed to the primary video output.
    pub fn output(&self) -> Option<StreamId> {
        self.session.video_source()
    }

    /// Run one transition and its synchronous effects.
    pub fn dispatch(&mut self, action: SessionAction) -> Option<MediaRequest> {
        debug!("session action {action:?}");
        let was_terminated = self.session.phase() == Phase::Terminated;
        let had_local = self.session.local_stream().is_some();

        let (next, effects) = self.session.clone().reduce(action);
        self.session = next;

        let mut request = None;
        for effect in effects {
            if let Some(pending) = self.run_effect(effect) {
                request = Some(pending);
            }
        }

        if !had_local && self.session.local_stream().is_some() {
            emit_client_event(ClientEvent::LocalMediaReady);
        }
        if !was_terminated && self.session.phase() == Phase::Terminated {
            info!(
                "left meeting {} after {}",
                self.session.meeting_id(),
                self.session.elapsed_display()
            );
            emit_client_event(ClientEvent::SessionEnded {
                meeting_id: self.session.meeting_id().to_string(),
            });
        }
        self.collab
            .sync_self(self.session.mic_enabled(), self.session.camera_enabled());
        self.drain_invites();
        request
    }

    /// Dispatch `action` and, if it starts a device request, wait for it and
    /// dispatch the outcome too.
    pub async fn apply(&mut self, action: SessionAction) {
        if let Some(request) = self.dispatch(action) {
            let follow_up = request.await;
            self.dispatch(follow_up);
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<MediaRequest> {
        match effect {
            Effect::AcquireUserMedia => {
                let acquire = self.media.acquire_user_media();
                return Some(
                    async move {
                        match acquire.await {
                            Ok(handle) => SessionAction::LocalMediaReady(handle),
                            Err(error) => SessionAction::LocalMediaFailed(error),
                        }
                    }
                    .boxed_local(),
                );
            }
            Effect::AcquireDisplayMedia => {
                let acquire = self.media.acquire_display_media();
                return Some(
                    async move {
                        match acquire.await {
                            Ok(handle) => SessionAction::ScreenShareReady(handle),
                            Err(error) => SessionAction::ScreenShareFailed(error),
                        }
                    }
                    .boxed_local(),
                );
            }
            Effect::SetTrackEnabled {
                stream,
                kind,
                enabled,
            } => self.media.set_track_enabled(stream, kind, enabled),
            Effect::AttachOutput(stream) => self.media.attach_output(stream),
            Effect::WatchEnded(stream) => self.media.watch_ended(stream),
            Effect::Release(stream) => {
                debug!("releasing {stream}");
                self.media.release(stream);
            }
            Effect::Notice(notice) => {
                self.collab.narrate(notice.text().to_string(), platform::now_ms());
                emit_client_event(match notice {
                    SystemNotice::ScreenShareStarted => ClientEvent::ScreenShareStarted,
                    SystemNotice::ScreenShareStopped => ClientEvent::ScreenShareStopped,
                });
            }
            Effect::LogDeviceFailure { device, error } => match device {
                Device::CameraAndMicrophone => {
                    warn!("camera/microphone unavailable: {error}");
                    emit_client_event(ClientEvent::LocalMediaFailed(error.to_string()));
                }
                Device::Screen => warn!("screen capture failed: {error}"),
            },
        }
        None
    }

    pub fn mount(&mut self) -> Option<MediaRequest> {
        self.dispatch(SessionAction::Mount)
    }

    pub fn toggle_mic(&mut self) {
        self.dispatch(SessionAction::ToggleMic);
    }

    pub fn toggle_camera(&mut self) {
        self.dispatch(SessionAction::ToggleCamera);
    }

    /// Start sharing when idle, stop when sharing.
    pub fn toggle_screen_share(&mut self) -> Option<MediaRequest> {
        if self.session.screen_sharing() {
            self.dispatch(SessionAction::StopScreenShare)
        } else {
            self.dispatch(SessionAction::StartScreenShare)
        }
    }

    pub fn stop_screen_share(&mut self) {
        self.dispatch(SessionAction::StopScreenShare);
    }

    pub fn tick(&mut self) {
        self.dispatch(SessionAction::Tick);
    }

    pub fn leave(&mut self) {
        self.dispatch(SessionAction::Leave);
    }

    pub fn send_chat_message(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        self.collab.send_chat_message(text, platform::now_ms())
    }

    pub fn attach_file(&mut self, file: FileAttachment) -> Result<&ChatMessage, ChatError> {
        self.collab.attach_file(file, platform::now_ms())
    }

    /// Validate `email` and return the detached store write.
    ///
    /// The returned future does not borrow the controller and may be spawned.
    /// It completes even if the call view is gone. While the call is still
    /// open, the written invitation reaches the roster on the next dispatch.
    pub fn invite(
        &self,
        email: &str,
        store: Arc<dyn MeetingStore>,
    ) -> Result<impl Future<Output = Result<Invitation, StoreError>> + 'static, InviteError> {
        let pending = self.collab.prepare_invite(
            email,
            self.session.meeting_id(),
            self.session.meeting_title(),
        )?;
        let write = dispatch_invite(pending, store, self.config.invite_delay_ms);
        let completed = self.invites_tx.clone();
        Ok(async move {
            let written = write.await;
            if let Ok(invitation) = &written {
                // Closed once the controller is dropped.
                let _ = completed.unbounded_send(invitation.clone());
            }
            written
        })
    }

    /// Add every invitation written since the last call to the roster.
    /// Invitations that land after leaving are discarded.
    pub fn drain_invites(&mut self) -> Vec<Participant> {
        let mut joined = Vec::new();
        while let Ok(Some(invitation)) = self.invites_rx.try_next() {
            if let Some(guest) = self.complete_invite(&invitation) {
                joined.push(guest);
            }
        }
        joined
    }

    /// Add the guest for a written invitation. `None` once the call has ended.
    pub fn complete_invite(&mut self, invitation: &Invitation) -> Option<Participant> {
        if self.session.phase() == Phase::Terminated {
            debug!("call ended, ignoring invitation {}", invitation.id);
            return None;
        }
        Some(self.collab.complete_invite(invitation, platform::now_ms()))
    }

    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, RosterError> {
        self.collab.remove_participant(id, platform::now_ms())
    }

    pub fn toggle_participant_mute(&mut self, id: &str) -> Result<bool, RosterError> {
        self.collab.toggle_participant_mute(id)
    }
}

impl<M: MediaBackend> Drop for SessionController<M> {
    fn drop(&mut self) {
        if self.session.phase() != Phase::Terminated {
            self.leave();
        }
    }
}

/// One-second tick source for the call timer.
///
/// Ticks arrive on a channel so the timer callback never touches the
/// controller. Dropping the clock stops it.
pub struct SessionClock {
    _interval: IntervalHandle,
    ticks: mpsc::UnboundedReceiver<SessionAction>,
}

impl SessionClock {
    pub fn start() -> Self {
        Self::with_period(TICK_MS)
    }

    pub fn with_period(period_ms: u32) -> Self {
        let (tx, ticks) = mpsc::unbounded();
        let interval = IntervalHandle::new(period_ms, move || {
            let _ = tx.unbounded_send(SessionAction::Tick);
        });
        Self {
            _interval: interval,
            ticks,
        }
    }

    /// Wait for the next tick.
    pub async fn next_tick(&mut self) -> Option<SessionAction> {
        self.ticks.next().await
    }
}
