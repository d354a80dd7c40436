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

//! Media device access.
//!
//! The session controller never touches browser objects directly. It talks to a
//! [`MediaBackend`], which owns the real capture objects and hands out opaque
//! [`StreamHandle`]s. Two backends exist:
//!
//! * [`SimulatedMedia`] - in-memory, records every operation. Used natively and in tests.
//! * `BrowserMedia` (feature `wasm`) - `getUserMedia` / `getDisplayMedia` through web-sys.

#[cfg(feature = "wasm")]
mod browser;
mod simulated;

#[cfg(feature = "wasm")]
pub use browser::BrowserMedia;
pub use simulated::{MediaOp, SimulatedMedia};

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identity of a captured stream. Stable for the lifetime of the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamId(pub u64);

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Audio,
    Video,
}

/// What the backend acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub id: StreamId,
    pub has_audio: bool,
    pub has_video: bool,
}

impl StreamHandle {
    pub fn has_track(&self, kind: TrackKind) -> bool {
        match kind {
            TrackKind::Audio => self.has_audio,
            TrackKind::Video => self.has_video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The user dismissed or refused the permission prompt.
    #[error("permission denied")]
    PermissionDenied,

    #[error("no matching device")]
    NotFound,

    #[error("media capture is not supported here")]
    Unsupported,

    #[error("media error: {0}")]
    Other(String),
}

/// Future returned by the acquisition calls. `'static` so the caller can spawn
/// it without holding a borrow of the backend.
pub type AcquireFuture = LocalBoxFuture<'static, Result<StreamHandle, MediaError>>;

/// Device operations the session controller needs.
///
/// Track and release operations are synchronous; only acquisition suspends.
pub trait MediaBackend {
    /// Request camera and microphone.
    fn acquire_user_media(&self) -> AcquireFuture;

    /// Request a screen capture. The user picks the surface.
    fn acquire_display_media(&self) -> AcquireFuture;

    /// Enable or disable every track of `kind` in `stream` without stopping it.
    fn set_track_enabled(&self, stream: StreamId, kind: TrackKind, enabled: bool);

    /// Route `stream` to the primary video output, or clear the output.
    fn attach_output(&self, stream: Option<StreamId>);

    /// Report the end of `stream` as [`ClientEvent::ScreenCaptureEnded`](crate::ClientEvent)
    /// when the platform stops it on its own.
    fn watch_ended(&self, stream: StreamId);

    /// Stop every track of `stream` and forget it. Unknown or already released
    /// streams are ignored.
    fn release(&self, stream: StreamId);
}
