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

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::debug;

use super::{AcquireFuture, MediaBackend, MediaError, StreamHandle, StreamId, TrackKind};
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOp {
    AcquireUser,
    AcquireDisplay,
    SetTrack(StreamId, TrackKind, bool),
    Attach(Option<StreamId>),
    Watch(StreamId),
    Release(StreamId),
}

#[derive(Debug)]
struct SimStream {
    audio: Option<bool>,
    video: bool,
    live: bool,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    streams: HashMap<StreamId, SimStream>,
    watched: HashSet<StreamId>,
    output: Option<StreamId>,
    user_media_error: Option<MediaError>,
    display_media_error: Option<MediaError>,
    ops: Vec<MediaOp>,
}

impl Inner {
    fn capture(&mut self, with_audio: bool) -> StreamHandle {
        self.next_id += 1;
        let id = StreamId(self.next_id);
        self.streams.insert(
            id,
            SimStream {
                audio: with_audio.then_some(true),
                video: true,
                live: true,
            },
        );
        StreamHandle {
            id,
            has_audio: with_audio,
            has_video: true,
        }
    }
}

/// In-memory media backend.
///
/// Grants every request unless told otherwise, and keeps a log of calls so the
/// device state can be inspected after the controller has run. Clones share
/// the same devices.
#[derive(Debug, Clone, Default)]
pub struct SimulatedMedia {
    inner: Rc<RefCell<Inner>>,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next camera/microphone request fail with `error`.
    pub fn deny_user_media(&self, error: MediaError) {
        self.inner.borrow_mut().user_media_error = Some(error);
    }

    /// Make screen capture requests fail with `error` until cleared.
    pub fn deny_display_media(&self, error: Option<MediaError>) {
        self.inner.borrow_mut().display_media_error = error;
    }

    /// The stream currently routed to the video output.
    pub fn output(&self) -> Option<StreamId> {
        self.inner.borrow().output
    }

    /// Enabled flag of a track, `None` if the stream or track does not exist.
    pub fn track_enabled(&self, stream: StreamId, kind: TrackKind) -> Option<bool> {
        let inner = self.inner.borrow();
        let s = inner.streams.get(&stream)?;
        match kind {
            TrackKind::Audio => s.audio,
            TrackKind::Video => Some(s.video),
        }
    }

    /// True while the capture is held (not released and not ended).
    pub fn is_live(&self, stream: StreamId) -> bool {
        self.inner
            .borrow()
            .streams
            .get(&stream)
            .map(|s| s.live)
            .unwrap_or(false)
    }

    /// Streams acquired and not yet released.
    pub fn held_streams(&self) -> Vec<StreamId> {
        let mut ids: Vec<_> = self.inner.borrow().streams.keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    pub fn ops(&self) -> Vec<MediaOp> {
        self.inner.borrow().ops.clone()
    }

    pub fn count(&self, op: &MediaOp) -> usize {
        self.inner.borrow().ops.iter().filter(|o| *o == op).count()
    }

    /// Simulate the user pressing the browser's own "stop sharing" control.
    ///
    /// Returns true if the stream was watched, in which case
    /// `ClientEvent::ScreenCaptureEnded` was emitted.
    pub fn end_capture(&self, stream: StreamId) -> bool {
        let watched = {
            let mut inner = self.inner.borrow_mut();
            if let Some(s) = inner.streams.get_mut(&stream) {
                s.live = false;
            }
            inner.watched.contains(&stream)
        };
        if watched {
            emit_client_event(ClientEvent::ScreenCaptureEnded(stream));
        }
        watched
    }
}

impl MediaBackend for SimulatedMedia {
    fn acquire_user_media(&self) -> AcquireFuture {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut inner = inner.borrow_mut();
            inner.ops.push(MediaOp::AcquireUser);
            match inner.user_media_error.take() {
                Some(err) => Err(err),
                None => Ok(inner.capture(true)),
            }
        })
    }

    fn acquire_display_media(&self) -> AcquireFuture {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut inner = inner.borrow_mut();
            inner.ops.push(MediaOp::AcquireDisplay);
            match inner.display_media_error.clone() {
                Some(err) => Err(err),
                None => Ok(inner.capture(false)),
            }
        })
    }

    fn set_track_enabled(&self, stream: StreamId, kind: TrackKind, enabled: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(MediaOp::SetTrack(stream, kind, enabled));
        if let Some(s) = inner.streams.get_mut(&stream) {
            match kind {
                TrackKind::Audio => {
                    if s.audio.is_some() {
                        s.audio = Some(enabled);
                    }
                }
                TrackKind::Video => s.video = enabled,
            }
        }
    }

    fn attach_output(&self, stream: Option<StreamId>) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(MediaOp::Attach(stream));
        inner.output = stream;
    }

    fn watch_ended(&self, stream: StreamId) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(MediaOp::Watch(stream));
        inner.watched.insert(stream);
    }

    fn release(&self, stream: StreamId) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(MediaOp::Release(stream));
        if inner.streams.remove(&stream).is_some() {
            debug!("released {stream}");
        }
        inner.watched.remove(&stream);
        if inner.output == Some(stream) {
            inner.output = None;
        }
    }
}
