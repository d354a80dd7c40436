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

//! Framework-agnostic event types for the meeting client.
//!
//! These events are emitted via the event bus and can be subscribed to by any
//! frontend framework (Yew, Dioxus, Leptos, or plain wasm-bindgen glue).

use crate::media::StreamId;
use crate::notifications::Notification;

/// Events emitted by the client core that UI frameworks can subscribe to.
#[derive(Clone, Debug)]
pub enum ClientEvent {
    // === Device Events ===
    /// Camera and microphone were acquired
    LocalMediaReady,

    /// Camera/microphone acquisition failed; the call continues without local video
    LocalMediaFailed(String),

    /// The browser ended a screen capture on its own (native "stop sharing" control)
    ScreenCaptureEnded(StreamId),

    // === Session Events ===
    ScreenShareStarted,
    ScreenShareStopped,

    /// The call view was left and every device released
    SessionEnded { meeting_id: String },

    // === Roster Events ===
    ParticipantJoined(String),
    ParticipantRemoved(String),

    /// An invitation record was written to the meeting store
    InvitationSent { to_email: String },

    // === Notifications ===
    Notification(Notification),
}
