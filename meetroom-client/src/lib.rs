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

//! Client core for the meetroom meeting app.
//!
//! The crate owns the call view's state and nothing of its rendering: the call
//! session state machine, the floating panels, the calculator, in-call chat and
//! roster, plus the pieces around a call (scheduled meetings, contacts and
//! notification polling) that share one key-value store.
//!
//! Everything compiles natively for tests and the CLI. The `wasm` feature adds
//! the browser bindings: `BrowserMedia` for `getUserMedia`/`getDisplayMedia`,
//! `LocalStore` over local storage and `PanelDragBinding` for window pointer
//! listeners.
//!
//! There is no media transport. Remote participants are roster placeholders.
//!
//! # Outline of usage
//!
//! ## Running a call
//! ```ignore
//! let mut call = SessionController::new(id, title, "Alice", BrowserMedia::new("local-video"), CallConfig::default());
//! if let Some(request) = call.mount() {
//!     // resolve the permission prompt, then feed the outcome back
//!     let follow_up = request.await;
//!     call.dispatch(follow_up);
//! }
//! call.toggle_mic();
//! call.leave(); // also runs on drop
//! ```
//!
//! ## Events
//! ```ignore
//! let mut events = subscribe_client_events();
//! while let Ok(event) = events.recv().await {
//!     match event {
//!         ClientEvent::ScreenCaptureEnded(id) => call.dispatch(SessionAction::ScreenCaptureEnded(id)),
//!         ...
//!     }
//! }
//! ```
//!
//! ## Invites
//! ```ignore
//! let send = call.invite("bob@example.com", store.clone())?; // validation only
//! platform::spawn(async move { let _ = send.await; });      // written after the simulated delay
//! // the guest shows up in the roster on the next dispatch
//! call.tick();
//! ```

pub mod assist;
pub mod calculator;
pub mod collab;
pub mod config;
pub mod constants;
pub mod contacts;
pub mod event_bus;
pub mod events;
pub mod media;
pub mod notifications;
pub mod panels;
pub mod platform;
pub mod scheduler;
pub mod session;
pub mod store;
mod utils;

pub use assist::{AiAssist, DisabledAssist};
pub use calculator::Calculator;
pub use collab::{ChatError, Collaboration, InviteError, RosterError};
pub use config::CallConfig;
pub use contacts::{ContactError, Contacts, UserDirectory};
pub use event_bus::{emit_client_event, global_client_sender, subscribe_client_events};
pub use events::ClientEvent;
#[cfg(feature = "wasm")]
pub use media::BrowserMedia;
pub use media::{MediaBackend, MediaError, SimulatedMedia, StreamHandle, StreamId, TrackKind};
pub use notifications::{Notification, NotificationKind, NotificationPoller};
#[cfg(feature = "wasm")]
pub use panels::PanelDragBinding;
pub use panels::{ListenerChange, PanelId, PanelManager, Position};
pub use scheduler::{JoinTarget, MeetingBook, NewMeeting, SchedulerError};
pub use session::{CallSession, Phase, SessionAction, SessionClock, SessionController};
#[cfg(not(target_arch = "wasm32"))]
pub use store::JsonFileStore;
#[cfg(feature = "wasm")]
pub use store::LocalStore;
pub use store::{Collection, MeetingStore, MeetingStoreExt, MemoryStore, StoreError};

