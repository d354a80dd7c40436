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

//! Process-wide broadcast of [`ClientEvent`]s.
//!
//! A MPMC broadcast channel: any component can subscribe and any component can
//! emit. The browser media backend uses it to report captures the browser ended
//! on its own, which the host then feeds back into the session controller.
//!
//! # Example
//!
//! ```ignore
//! use meetroom_client::{subscribe_client_events, ClientEvent, SessionAction};
//!
//! let mut rx = subscribe_client_events();
//! meetroom_client::platform::spawn(async move {
//!     while let Ok(event) = rx.recv().await {
//!         if let ClientEvent::ScreenCaptureEnded(stream) = event {
//!             controller.borrow_mut().dispatch(SessionAction::ScreenCaptureEnded(stream));
//!         }
//!     }
//! });
//! ```

use crate::events::ClientEvent;
use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};
use once_cell::sync::Lazy;

/// Events buffered per subscriber before the oldest is dropped.
pub const EVENT_BUS_CAPACITY: usize = 256;

struct EventBus {
    sender: Sender<ClientEvent>,
    // Keeps the channel open while nobody is subscribed.
    _keepalive: InactiveReceiver<ClientEvent>,
}

static BUS: Lazy<EventBus> = Lazy::new(|| {
    let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
    sender.set_overflow(true);
    EventBus {
        sender,
        _keepalive: receiver.deactivate(),
    }
});

/// Get the global sender for emitting client events.
pub fn global_client_sender() -> Sender<ClientEvent> {
    BUS.sender.clone()
}

/// Subscribe to client events.
///
/// Each subscriber receives every event emitted after subscription.
pub fn subscribe_client_events() -> Receiver<ClientEvent> {
    BUS.sender.new_receiver()
}

/// Emit a client event to all subscribers.
///
/// Non-blocking. When the channel is full the oldest message is dropped.
pub fn emit_client_event(event: ClientEvent) {
    if BUS.sender.receiver_count() == 0 {
        return;
    }
    deliver(&BUS.sender, event);
}

/// Returns false if the event could not be queued.
fn deliver(sender: &Sender<ClientEvent>, event: ClientEvent) -> bool {
    match sender.try_broadcast(event) {
        Ok(None) => true,
        Ok(Some(dropped)) => {
            log::debug!("event bus full, dropped {dropped:?}");
            true
        }
        Err(e) => {
            log::debug!("could not emit client event: {e:?}");
            false
        }
    }
}
