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

//! Chat, roster and invites through the session controller.

#![cfg(not(target_arch = "wasm32"))]

use std::sync::Arc;
use std::time::Duration;

use meetroom_client::store::{Collection, MeetingStoreExt, MemoryStore};
use meetroom_client::{
    subscribe_client_events, CallConfig, ChatError, ClientEvent, RosterError, SessionAction,
    SessionController, SimulatedMedia,
};
use meetroom_types::{FileAttachment, Invitation, MessageKind};

async fn joined() -> SessionController<SimulatedMedia> {
    let mut call = SessionController::new(
        "ROOM1",
        "Weekly sync",
        "Alice",
        SimulatedMedia::new(),
        CallConfig::default(),
    );
    call.apply(SessionAction::Mount).await;
    call
}

#[tokio::test]
async fn chat_rejects_blank_and_appends_text() {
    let mut call = joined().await;
    assert_eq!(call.send_chat_message("  \n\t").err(), Some(ChatError::Empty));
    assert!(call.collaboration().chat().is_empty());

    let message = call.send_chat_message("hello").unwrap().clone();
    assert_eq!(message.text.as_deref(), Some("hello"));
    assert_eq!(message.sender, "Alice");
    assert!(message.is_me);
    assert_eq!(message.kind, MessageKind::Chat);
    assert_eq!(call.collaboration().chat().len(), 1);
}

#[tokio::test]
async fn messages_keep_dispatch_order() {
    let mut call = joined().await;
    call.send_chat_message("one").unwrap();
    call.attach_file(FileAttachment {
        name: "deck.pdf".into(),
        handle: "/tmp/deck.pdf".into(),
        size_bytes: 4096,
        mime_type: "application/pdf".into(),
    })
    .unwrap();
    call.send_chat_message("two").unwrap();

    let log = call.collaboration().chat().messages();
    assert_eq!(log[0].text.as_deref(), Some("one"));
    assert_eq!(log[1].file.as_ref().map(|f| f.display_size()), Some("4.0 KB".into()));
    assert_eq!(log[2].text.as_deref(), Some("two"));
    assert!(log.iter().all(|m| m.is_well_formed()));
}

#[tokio::test(start_paused = true)]
async fn invalid_invite_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let call = joined().await;
    assert!(call.invite("not-an-email", store.clone()).is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;
    let stored: Vec<Invitation> = store.read_collection(Collection::Invitations).unwrap();
    assert!(stored.is_empty());
    assert_eq!(call.collaboration().roster().len(), 1);
    assert!(call.collaboration().chat().is_empty());
}

#[tokio::test(start_paused = true)]
async fn invite_lands_after_delay_and_adds_one_guest() {
    let store = Arc::new(MemoryStore::new());
    let mut events = subscribe_client_events();
    let mut call = joined().await;

    let send = tokio::spawn(call.invite("bob@x.com", store.clone()).unwrap());
    tokio::time::sleep(Duration::from_millis(500)).await;
    let stored: Vec<Invitation> = store.read_collection(Collection::Invitations).unwrap();
    assert!(stored.is_empty(), "written before the delay");

    let invitation = send.await.unwrap().unwrap();
    assert_eq!(invitation.to_email, "bob@x.com");
    assert_eq!(invitation.meeting_id, "ROOM1");
    assert_eq!(invitation.meeting_title, "Weekly sync");
    assert_eq!(invitation.from_name, "Alice");

    let joined_guests = call.drain_invites();
    assert_eq!(joined_guests.len(), 1);
    let guest = &joined_guests[0];
    assert_eq!(guest.name, "bob (Guest)");
    assert!(guest.is_muted && !guest.is_cam_on && !guest.is_me);

    let roster = call.collaboration().roster();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.participants().iter().filter(|p| p.is_me).count(), 1);

    let system: Vec<_> = call
        .collaboration()
        .chat()
        .messages()
        .iter()
        .filter(|m| m.is_system())
        .collect();
    assert_eq!(system.len(), 1);
    assert!(system[0].text.as_deref().unwrap().contains("bob@x.com"));

    let mut saw_sent = false;
    while let Ok(event) = events.try_recv() {
        if matches!(&event, ClientEvent::InvitationSent { to_email } if to_email == "bob@x.com") {
            saw_sent = true;
        }
    }
    assert!(saw_sent);
}

#[tokio::test(start_paused = true)]
async fn next_dispatch_adds_the_invited_guest() {
    let store = Arc::new(MemoryStore::new());
    let mut call = joined().await;
    let send = tokio::spawn(call.invite("dan@x.com", store.clone()).unwrap());
    send.await.unwrap().unwrap();

    call.tick();
    let roster = call.collaboration().roster();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.participants()[1].name, "dan (Guest)");
    assert_eq!(
        call.collaboration().chat().last().and_then(|m| m.text.as_deref()),
        Some("Invitation sent to dan@x.com")
    );

    // Already drained.
    assert!(call.drain_invites().is_empty());
    assert_eq!(call.collaboration().roster().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn invite_landing_after_leave_leaves_roster_alone() {
    let store = Arc::new(MemoryStore::new());
    let mut call = joined().await;
    let send = tokio::spawn(call.invite("erin@x.com", store.clone()).unwrap());
    call.leave();

    let invitation = send.await.unwrap().unwrap();
    assert!(call.drain_invites().is_empty());
    assert_eq!(call.complete_invite(&invitation), None);
    call.tick();

    assert_eq!(call.collaboration().roster().len(), 1);
    assert!(call.collaboration().chat().is_empty());
    let stored: Vec<Invitation> = store.read_collection(Collection::Invitations).unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn invite_completes_after_the_view_closes() {
    let store = Arc::new(MemoryStore::new());
    let call = joined().await;
    let send = tokio::spawn(call.invite("carol@x.com", store.clone()).unwrap());
    drop(call);

    send.await.unwrap().unwrap();
    let stored: Vec<Invitation> = store.read_collection(Collection::Invitations).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].to_email, "carol@x.com");
}

#[tokio::test]
async fn host_cannot_remove_themselves() {
    let mut call = joined().await;
    let me = call.collaboration().roster().me().unwrap().id.clone();
    assert_eq!(call.remove_participant(&me).err(), Some(RosterError::IsSelf));
    assert_eq!(call.toggle_participant_mute(&me).err(), Some(RosterError::IsSelf));
    assert_eq!(call.collaboration().roster().len(), 1);
}
