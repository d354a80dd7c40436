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

//! A scripted call on simulated devices, for trying the session flow without a browser.

use std::sync::Arc;

use meetroom_client::constants::DEFAULT_MEETING_TITLE;
use meetroom_client::{
    CallConfig, MeetingBook, MeetingStore, SessionAction, SessionClock, SessionController,
    SimulatedMedia,
};
use tracing::{info, warn};

use meetroom_cli::cli_args::Call;

pub async fn call(store: Arc<dyn MeetingStore>, opts: Call) -> anyhow::Result<()> {
    let target = MeetingBook::new(store.clone()).join(&opts.meeting_id)?;
    let title = target
        .title
        .unwrap_or_else(|| DEFAULT_MEETING_TITLE.to_string());
    let config = CallConfig {
        mic_on_join: !opts.muted,
        ..CallConfig::default()
    };

    let mut session = SessionController::new(
        &target.meeting_id,
        &title,
        &opts.name,
        SimulatedMedia::new(),
        config,
    );
    session.apply(SessionAction::Mount).await;
    info!("in call \"{title}\" as {}", opts.name);

    let mut sending = Vec::new();
    for email in &opts.invites {
        match session.invite(email, store.clone()) {
            Ok(send) => sending.push(tokio::spawn(send)),
            Err(e) => warn!("{e}"),
        }
    }
    if let Some(text) = &opts.say {
        if let Err(e) = session.send_chat_message(text) {
            warn!("message not sent: {e}");
        }
    }
    if opts.share {
        session.apply(SessionAction::StartScreenShare).await;
    }

    let mut clock = SessionClock::start();
    for _ in 0..opts.seconds {
        if let Some(tick) = clock.next_tick().await {
            session.dispatch(tick);
        }
    }

    for send in sending {
        send.await??;
    }
    for guest in session.drain_invites() {
        info!("{} joined the roster", guest.name);
    }
    if session.session().screen_sharing() {
        session.stop_screen_share();
    }

    println!("--- participants ---");
    for p in session.collaboration().roster().participants() {
        let mic = if p.is_muted { "muted" } else { "mic on" };
        let cam = if p.is_cam_on { "cam on" } else { "cam off" };
        println!("{}  ({mic}, {cam})", p.name);
    }
    println!("--- chat ---");
    for m in session.collaboration().chat().messages() {
        let body = match (&m.text, &m.file) {
            (Some(text), _) => text.clone(),
            (None, Some(file)) => format!("[file] {} {}", file.name, file.display_size()),
            (None, None) => String::new(),
        };
        println!("{}: {body}", m.sender);
    }

    session.leave();
    println!("Call ended after {}", session.elapsed_display());
    Ok(())
}
