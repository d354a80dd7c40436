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

//! Call session state machine.
//!
//! [`CallSession::reduce`] is a pure transition: it takes the current state and
//! an action and returns the next state together with the device [`Effect`]s to
//! run. [`SessionController`] executes those effects against a
//! [`MediaBackend`](crate::media::MediaBackend).
//!
//! ```text
//!   Initializing --LocalMediaReady--> Active
//!        |        --LocalMediaFailed-> Active (no local video)
//!        |                               |
//!        +-------------Leave-------------+--> Terminated
//! ```

mod controller;

pub use controller::{MediaRequest, SessionClock, SessionController};

use crate::config::CallConfig;
use crate::media::{MediaError, StreamHandle, StreamId, TrackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Active,
    Terminated,
}

/// Inputs to the state machine: user commands, device completions and timer ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Mount,
    LocalMediaReady(StreamHandle),
    LocalMediaFailed(MediaError),
    ToggleMic,
    ToggleCamera,
    StartScreenShare,
    ScreenShareReady(StreamHandle),
    ScreenShareFailed(MediaError),
    StopScreenShare,
    /// The platform stopped a capture by itself.
    ScreenCaptureEnded(StreamId),
    Tick,
    Leave,
}

/// Session events narrated in the chat log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemNotice {
    ScreenShareStarted,
    ScreenShareStopped,
}

impl SystemNotice {
    pub fn text(self) -> &'static str {
        match self {
            SystemNotice::ScreenShareStarted => "You started screen sharing",
            SystemNotice::ScreenShareStopped => "Screen sharing ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    CameraAndMicrophone,
    Screen,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AcquireUserMedia,
    AcquireDisplayMedia,
    SetTrackEnabled {
        stream: StreamId,
        kind: TrackKind,
        enabled: bool,
    },
    AttachOutput(Option<StreamId>),
    WatchEnded(StreamId),
    Release(StreamId),
    Notice(SystemNotice),
    LogDeviceFailure { device: Device, error: MediaError },
}

/// State of one active call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSession {
    meeting_id: String,
    meeting_title: String,
    mic_enabled: bool,
    camera_enabled: bool,
    screen_sharing: bool,
    elapsed_seconds: u64,
    local_stream: Option<StreamHandle>,
    screen_stream: Option<StreamId>,
    phase: Phase,
    camera_failed: bool,
    user_media_pending: bool,
    screen_request_pending: bool,
}

impl CallSession {
    pub fn new(meeting_id: impl Into<String>, meeting_title: impl Into<String>, config: &CallConfig) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            meeting_title: meeting_title.into(),
            mic_enabled: config.mic_on_join,
            camera_enabled: config.camera_on_join,
            screen_sharing: false,
            elapsed_seconds: 0,
            local_stream: None,
            screen_stream: None,
            phase: Phase::Initializing,
            camera_failed: false,
            user_media_pending: false,
            screen_request_pending: false,
        }
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    pub fn meeting_title(&self) -> &str {
        &self.meeting_title
    }

    pub fn mic_enabled(&self) -> bool {
        self.mic_enabled
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    pub fn screen_sharing(&self) -> bool {
        self.screen_sharing
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when camera/microphone acquisition failed and the avatar placeholder is shown.
    pub fn camera_failed(&self) -> bool {
        self.camera_failed
    }

    pub fn local_stream(&self) -> Option<StreamId> {
        self.local_stream.as_ref().map(|s| s.id)
    }

    pub fn screen_stream(&self) -> Option<StreamId> {
        self.screen_stream
    }

    /// The stream that should feed the primary video output right now.
    pub fn video_source(&self) -> Option<StreamId> {
        if self.screen_sharing {
            self.screen_stream
        } else {
            self.local_stream()
        }
    }

    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Apply `action`, returning the next state and the effects to execute in order.
    pub fn reduce(mut self, action: SessionAction) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        if self.phase == Phase::Terminated {
            // Late device grants must not outlive the session.
            match action {
                SessionAction::LocalMediaReady(handle) | SessionAction::ScreenShareReady(handle) => {
                    effects.push(Effect::Release(handle.id));
                }
                _ => {}
            }
            return (self, effects);
        }

        match action {
            SessionAction::Mount => {
                if self.phase == Phase::Initializing
                    && !self.user_media_pending
                    && self.local_stream.is_none()
                {
                    self.user_media_pending = true;
                    effects.push(Effect::AcquireUserMedia);
                }
            }
            SessionAction::LocalMediaReady(handle) => {
                if self.local_stream.is_some() || !self.user_media_pending {
                    effects.push(Effect::Release(handle.id));
                } else {
                    self.user_media_pending = false;
                    self.phase = Phase::Active;
                    self.camera_failed = false;
                    if handle.has_audio {
                        effects.push(Effect::SetTrackEnabled {
                            stream: handle.id,
                            kind: TrackKind::Audio,
                            enabled: self.mic_enabled,
                        });
                    }
                    if handle.has_video {
                        effects.push(Effect::SetTrackEnabled {
                            stream: handle.id,
                            kind: TrackKind::Video,
                            enabled: self.camera_enabled,
                        });
                    }
                    if !self.screen_sharing {
                        effects.push(Effect::AttachOutput(Some(handle.id)));
                    }
                    self.local_stream = Some(handle);
                }
            }
            SessionAction::LocalMediaFailed(error) => {
                if self.user_media_pending {
                    self.user_media_pending = false;
                    self.phase = Phase::Active;
                    self.camera_failed = true;
                    effects.push(Effect::LogDeviceFailure {
                        device: Device::CameraAndMicrophone,
                        error,
                    });
                }
            }
            SessionAction::ToggleMic => {
                self.mic_enabled = !self.mic_enabled;
                if let Some(stream) = self.local_stream.as_ref().filter(|s| s.has_audio) {
                    effects.push(Effect::SetTrackEnabled {
                        stream: stream.id,
                        kind: TrackKind::Audio,
                        enabled: self.mic_enabled,
                    });
                }
            }
            SessionAction::ToggleCamera => {
                self.camera_enabled = !self.camera_enabled;
                if let Some(stream) = self.local_stream.as_ref().filter(|s| s.has_video) {
                    effects.push(Effect::SetTrackEnabled {
                        stream: stream.id,
                        kind: TrackKind::Video,
                        enabled: self.camera_enabled,
                    });
                    if self.camera_enabled && !self.screen_sharing {
                        effects.push(Effect::AttachOutput(Some(stream.id)));
                    }
                }
            }
            SessionAction::StartScreenShare => {
                if !self.screen_sharing && !self.screen_request_pending {
                    self.screen_request_pending = true;
                    effects.push(Effect::AcquireDisplayMedia);
                }
            }
            SessionAction::ScreenShareReady(handle) => {
                if !self.screen_request_pending || self.screen_sharing {
                    effects.push(Effect::Release(handle.id));
                } else {
                    self.screen_request_pending = false;
                    self.screen_sharing = true;
                    self.screen_stream = Some(handle.id);
                    effects.push(Effect::AttachOutput(Some(handle.id)));
                    effects.push(Effect::WatchEnded(handle.id));
                    effects.push(Effect::Notice(SystemNotice::ScreenShareStarted));
                }
            }
            SessionAction::ScreenShareFailed(error) => {
                self.screen_request_pending = false;
                // Cancelling the picker is not an error.
                if error != MediaError::PermissionDenied {
                    effects.push(Effect::LogDeviceFailure {
                        device: Device::Screen,
                        error,
                    });
                }
            }
            SessionAction::StopScreenShare => self.stop_screen_share(&mut effects),
            SessionAction::ScreenCaptureEnded(stream) => {
                if self.screen_stream == Some(stream) {
                    self.stop_screen_share(&mut effects);
                }
            }
            SessionAction::Tick => {
                self.elapsed_seconds += 1;
            }
            SessionAction::Leave => {
                if let Some(stream) = self.local_stream.take() {
                    effects.push(Effect::Release(stream.id));
                }
                if let Some(stream) = self.screen_stream.take() {
                    effects.push(Effect::Release(stream));
                }
                effects.push(Effect::AttachOutput(None));
                self.screen_sharing = false;
                self.user_media_pending = false;
                self.screen_request_pending = false;
                self.phase = Phase::Terminated;
            }
        }

        (self, effects)
    }

    fn stop_screen_share(&mut self, effects: &mut Vec<Effect>) {
        let Some(stream) = self.screen_stream.take() else {
            return;
        };
        self.screen_sharing = false;
        effects.push(Effect::Release(stream));
        let camera = self
            .local_stream
            .as_ref()
            .filter(|_| self.camera_enabled)
            .map(|s| s.id);
        effects.push(Effect::AttachOutput(camera));
        effects.push(Effect::Notice(SystemNotice::ScreenShareStopped));
    }
}

/// `HH:MM:SS`, zero padded. Hours are not wrapped at 24.
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: u64, audio: bool) -> StreamHandle {
        StreamHandle {
            id: StreamId(id),
            has_audio: audio,
            has_video: true,
        }
    }

    fn active() -> CallSession {
        let s = CallSession::new("ABCDE", "Standup", &CallConfig::default());
        let (s, _) = s.reduce(SessionAction::Mount);
        let (s, _) = s.reduce(SessionAction::LocalMediaReady(handle(1, true)));
        s
    }

    #[test]
    fn mount_requests_devices_once() {
        let s = CallSession::new("m", "t", &CallConfig::default());
        let (s, effects) = s.reduce(SessionAction::Mount);
        assert_eq!(effects, vec![Effect::AcquireUserMedia]);
        let (_, effects) = s.reduce(SessionAction::Mount);
        assert!(effects.is_empty());
    }

    #[test]
    fn local_media_applies_flags_and_attaches_output() {
        let config = CallConfig {
            mic_on_join: false,
            ..CallConfig::default()
        };
        let s = CallSession::new("m", "t", &config);
        let (s, _) = s.reduce(SessionAction::Mount);
        let (s, effects) = s.reduce(SessionAction::LocalMediaReady(handle(1, true)));
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(
            effects,
            vec![
                Effect::SetTrackEnabled {
                    stream: StreamId(1),
                    kind: TrackKind::Audio,
                    enabled: false
                },
                Effect::SetTrackEnabled {
                    stream: StreamId(1),
                    kind: TrackKind::Video,
                    enabled: true
                },
                Effect::AttachOutput(Some(StreamId(1))),
            ]
        );
    }

    #[test]
    fn device_failure_degrades_to_placeholder() {
        let s = CallSession::new("m", "t", &CallConfig::default());
        let (s, _) = s.reduce(SessionAction::Mount);
        let (s, effects) = s.reduce(SessionAction::LocalMediaFailed(MediaError::NotFound));
        assert_eq!(s.phase(), Phase::Active);
        assert!(s.camera_failed());
        assert!(matches!(
            effects.as_slice(),
            [Effect::LogDeviceFailure {
                device: Device::CameraAndMicrophone,
                ..
            }]
        ));
        // Toggles still work without a stream, they only flip the flag.
        let (s, effects) = s.reduce(SessionAction::ToggleMic);
        assert!(!s.mic_enabled());
        assert!(effects.is_empty());
    }

    #[test]
    fn toggles_only_touch_tracks() {
        let s = active();
        let (s, effects) = s.reduce(SessionAction::ToggleCamera);
        assert_eq!(
            effects,
            vec![Effect::SetTrackEnabled {
                stream: StreamId(1),
                kind: TrackKind::Video,
                enabled: false
            }]
        );
        let (s, effects) = s.reduce(SessionAction::ToggleMic);
        assert_eq!(
            effects,
            vec![Effect::SetTrackEnabled {
                stream: StreamId(1),
                kind: TrackKind::Audio,
                enabled: false
            }]
        );
        assert_eq!(s.local_stream(), Some(StreamId(1)));
    }

    #[test]
    fn screen_share_swaps_output_and_narrates() {
        let s = active();
        let (s, effects) = s.reduce(SessionAction::StartScreenShare);
        assert_eq!(effects, vec![Effect::AcquireDisplayMedia]);
        let (s, effects) = s.reduce(SessionAction::StartScreenShare);
        assert!(effects.is_empty(), "a pending request is not duplicated");

        let (s, effects) = s.reduce(SessionAction::ScreenShareReady(handle(2, false)));
        assert!(s.screen_sharing());
        assert_eq!(s.video_source(), Some(StreamId(2)));
        assert_eq!(
            effects,
            vec![
                Effect::AttachOutput(Some(StreamId(2))),
                Effect::WatchEnded(StreamId(2)),
                Effect::Notice(SystemNotice::ScreenShareStarted),
            ]
        );

        let (s, effects) = s.reduce(SessionAction::StopScreenShare);
        assert!(!s.screen_sharing());
        assert_eq!(
            effects,
            vec![
                Effect::Release(StreamId(2)),
                Effect::AttachOutput(Some(StreamId(1))),
                Effect::Notice(SystemNotice::ScreenShareStopped),
            ]
        );
    }

    #[test]
    fn stopping_share_with_camera_off_leaves_output_empty() {
        let s = active();
        let (s, _) = s.reduce(SessionAction::StartScreenShare);
        let (s, _) = s.reduce(SessionAction::ScreenShareReady(handle(2, false)));
        let (s, _) = s.reduce(SessionAction::ToggleCamera);
        let (_, effects) = s.reduce(SessionAction::StopScreenShare);
        assert!(effects.contains(&Effect::AttachOutput(None)));
    }

    #[test]
    fn cancelled_picker_is_silent() {
        let s = active();
        let (s, _) = s.reduce(SessionAction::StartScreenShare);
        let before = s.clone();
        let (s, effects) = s.reduce(SessionAction::ScreenShareFailed(MediaError::PermissionDenied));
        assert!(effects.is_empty());
        assert!(!s.screen_sharing());
        // Only the pending flag moved; a new request is accepted again.
        let (_, effects) = s.reduce(SessionAction::StartScreenShare);
        assert_eq!(effects, vec![Effect::AcquireDisplayMedia]);
        assert!(!before.screen_sharing());
    }

    #[test]
    fn ended_signal_for_other_stream_is_ignored() {
        let s = active();
        let (s, _) = s.reduce(SessionAction::StartScreenShare);
        let (s, _) = s.reduce(SessionAction::ScreenShareReady(handle(2, false)));
        let (s, effects) = s.reduce(SessionAction::ScreenCaptureEnded(StreamId(9)));
        assert!(effects.is_empty());
        let (s, effects) = s.reduce(SessionAction::ScreenCaptureEnded(StreamId(2)));
        assert!(!s.screen_sharing());
        assert!(effects.contains(&Effect::Release(StreamId(2))));
    }

    #[test]
    fn leave_releases_everything_and_is_idempotent() {
        let s = active();
        let (s, _) = s.reduce(SessionAction::StartScreenShare);
        let (s, _) = s.reduce(SessionAction::ScreenShareReady(handle(2, false)));
        let (s, effects) = s.reduce(SessionAction::Leave);
        assert_eq!(
            effects,
            vec![
                Effect::Release(StreamId(1)),
                Effect::Release(StreamId(2)),
                Effect::AttachOutput(None)
            ]
        );
        assert_eq!(s.phase(), Phase::Terminated);
        let (_, effects) = s.reduce(SessionAction::Leave);
        assert!(effects.is_empty());
    }

    #[test]
    fn late_grant_after_leave_is_released() {
        let s = CallSession::new("m", "t", &CallConfig::default());
        let (s, _) = s.reduce(SessionAction::Mount);
        let (s, _) = s.reduce(SessionAction::Leave);
        let (s, effects) = s.reduce(SessionAction::LocalMediaReady(handle(5, true)));
        assert_eq!(effects, vec![Effect::Release(StreamId(5))]);
        assert_eq!(s.local_stream(), None);
    }

    #[test]
    fn ticks_format_as_clock() {
        let mut s = CallSession::new("m", "t", &CallConfig::default());
        for _ in 0..65 {
            s = s.reduce(SessionAction::Tick).0;
        }
        assert_eq!(s.elapsed_display(), "00:01:05");
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(3600 * 125 + 59), "125:00:59");
    }
}
