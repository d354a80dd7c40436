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
use std::collections::HashMap;
use std::rc::Rc;

use gloo_utils::{document, window};
use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use super::{AcquireFuture, MediaBackend, MediaError, StreamHandle, StreamId, TrackKind};
use crate::event_bus::emit_client_event;
use crate::events::ClientEvent;

#[derive(Default)]
struct Captures {
    next_id: u64,
    streams: HashMap<StreamId, MediaStream>,
    // Kept alive while the track's `onended` handler is installed.
    on_ended: HashMap<StreamId, Closure<dyn FnMut()>>,
}

/// [BrowserMedia] acquires devices through `navigator.mediaDevices` and routes
/// the chosen stream into the `<video>` element with id `video_element_id`.
#[derive(Clone)]
pub struct BrowserMedia {
    video_element_id: String,
    captures: Rc<RefCell<Captures>>,
}

impl BrowserMedia {
    pub fn new(video_element_id: impl Into<String>) -> Self {
        Self {
            video_element_id: video_element_id.into(),
            captures: Rc::new(RefCell::new(Captures::default())),
        }
    }

    fn video_element(&self) -> Option<HtmlVideoElement> {
        document()
            .get_element_by_id(&self.video_element_id)
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
    }

    fn register(captures: &Rc<RefCell<Captures>>, stream: MediaStream) -> StreamHandle {
        let has_audio = stream.get_audio_tracks().length() > 0;
        let has_video = stream.get_video_tracks().length() > 0;
        let mut captures = captures.borrow_mut();
        captures.next_id += 1;
        let id = StreamId(captures.next_id);
        captures.streams.insert(id, stream);
        StreamHandle {
            id,
            has_audio,
            has_video,
        }
    }

    fn tracks(array: Array) -> impl Iterator<Item = MediaStreamTrack> {
        array
            .iter()
            .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
            .collect::<Vec<_>>()
            .into_iter()
    }
}

fn media_error(err: JsValue) -> MediaError {
    if let Some(dom) = err.dyn_ref::<DomException>() {
        return match dom.name().as_str() {
            "NotAllowedError" | "PermissionDeniedError" | "AbortError" => {
                MediaError::PermissionDenied
            }
            "NotFoundError" | "OverconstrainedError" => MediaError::NotFound,
            "NotSupportedError" => MediaError::Unsupported,
            other => MediaError::Other(format!("{other}: {}", dom.message())),
        };
    }
    MediaError::Other(format!("{err:?}"))
}

impl MediaBackend for BrowserMedia {
    fn acquire_user_media(&self) -> AcquireFuture {
        let captures = self.captures.clone();
        Box::pin(async move {
            let media_devices = window()
                .navigator()
                .media_devices()
                .map_err(|_| MediaError::Unsupported)?;
            let constraints = MediaStreamConstraints::new();
            constraints.set_audio(&JsValue::from_bool(true));
            constraints.set_video(&JsValue::from_bool(true));
            let promise = media_devices
                .get_user_media_with_constraints(&constraints)
                .map_err(media_error)?;
            let stream = JsFuture::from(promise)
                .await
                .map_err(media_error)?
                .unchecked_into::<MediaStream>();
            Ok(Self::register(&captures, stream))
        })
    }

    fn acquire_display_media(&self) -> AcquireFuture {
        let captures = self.captures.clone();
        Box::pin(async move {
            let media_devices = window()
                .navigator()
                .media_devices()
                .map_err(|_| MediaError::Unsupported)?;
            let promise = media_devices.get_display_media().map_err(media_error)?;
            let stream = JsFuture::from(promise)
                .await
                .map_err(media_error)?
                .unchecked_into::<MediaStream>();
            Ok(Self::register(&captures, stream))
        })
    }

    fn set_track_enabled(&self, stream: StreamId, kind: TrackKind, enabled: bool) {
        let captures = self.captures.borrow();
        let Some(media) = captures.streams.get(&stream) else {
            return;
        };
        let tracks = match kind {
            TrackKind::Audio => media.get_audio_tracks(),
            TrackKind::Video => media.get_video_tracks(),
        };
        for track in Self::tracks(tracks) {
            track.set_enabled(enabled);
        }
    }

    fn attach_output(&self, stream: Option<StreamId>) {
        let Some(video) = self.video_element() else {
            warn!("video element #{} not found", self.video_element_id);
            return;
        };
        let captures = self.captures.borrow();
        let source = stream.and_then(|id| captures.streams.get(&id));
        video.set_src_object(source);
    }

    fn watch_ended(&self, stream: StreamId) {
        let mut captures = self.captures.borrow_mut();
        let Some(media) = captures.streams.get(&stream).cloned() else {
            return;
        };
        let handler = Closure::wrap(Box::new(move || {
            debug!("browser ended capture {stream}");
            emit_client_event(ClientEvent::ScreenCaptureEnded(stream));
        }) as Box<dyn FnMut()>);
        if let Some(track) = Self::tracks(media.get_video_tracks()).next() {
            track.set_onended(Some(handler.as_ref().unchecked_ref()));
        }
        captures.on_ended.insert(stream, handler);
    }

    fn release(&self, stream: StreamId) {
        let mut captures = self.captures.borrow_mut();
        if let Some(media) = captures.streams.remove(&stream) {
            for track in Self::tracks(media.get_tracks()) {
                track.set_onended(None);
                track.stop();
            }
            debug!("released {stream}");
        }
        captures.on_ended.remove(&stream);
    }
}
