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

//! Call lifecycle against the simulated media backend.

#![cfg(not(target_arch = "wasm32"))]

use futures::executor::block_on;
use meetroom_client::media::MediaOp;
use meetroom_client::{
    CallConfig, MediaError, Phase, SessionAction, SessionClock, SessionController, SimulatedMedia,
    TrackKind,
};

fn join(media: &SimulatedMedia, config: CallConfig) -> SessionController<SimulatedMedia> {
    let mut call = SessionController::new("QWERT", "Design review", "Alice", media.clone(), config);
    block_on(call.apply(SessionAction::Mount));
    call
}

fn share(call: &mut SessionController<SimulatedMedia>) {
    block_on(call.apply(SessionAction::StartScreenShare));
}

#[test]
fn track_state_matches_flags_after_every_toggle() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    let local = call.session().local_stream().expect("camera granted");

    for _ in 0..5 {
        call.toggle_mic();
        assert_eq!(
            media.track_enabled(local, TrackKind::Audio),
            Some(call.session().mic_enabled())
        );
        call.toggle_camera();
        assert_eq!(
            media.track_enabled(local, TrackKind::Video),
            Some(call.session().camera_enabled())
        );
    }
    assert_eq!(media.count(&MediaOp::AcquireUser), 1);
    assert_eq!(media.held_streams(), vec![local]);
}

#[test]
fn join_flags_apply_to_fresh_tracks() {
    let media = SimulatedMedia::new();
    let call = join(
        &media,
        CallConfig {
            mic_on_join: false,
            camera_on_join: false,
            ..CallConfig::default()
        },
    );
    let local = call.session().local_stream().unwrap();
    assert_eq!(media.track_enabled(local, TrackKind::Audio), Some(false));
    assert_eq!(media.track_enabled(local, TrackKind::Video), Some(false));
}

#[test]
fn stopping_share_restores_camera_only_if_enabled() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    let local = call.session().local_stream();

    share(&mut call);
    let screen = call.session().screen_stream();
    assert!(screen.is_some());
    assert_eq!(media.output(), screen);
    call.stop_screen_share();
    assert_eq!(media.output(), local);

    call.toggle_camera();
    share(&mut call);
    call.stop_screen_share();
    assert_eq!(media.output(), None);
    assert!(!call.session().screen_sharing());
}

#[test]
fn toggling_camera_on_while_sharing_keeps_screen_output() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    call.toggle_camera();
    share(&mut call);
    call.toggle_camera();
    assert_eq!(media.output(), call.session().screen_stream());
}

#[test]
fn platform_ending_the_capture_stops_sharing() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    share(&mut call);
    let screen = call.session().screen_stream().unwrap();

    assert!(media.end_capture(screen));
    call.dispatch(SessionAction::ScreenCaptureEnded(screen));

    assert!(!call.session().screen_sharing());
    assert!(!media.held_streams().contains(&screen));
    assert_eq!(media.output(), call.session().local_stream());
}

#[test]
fn second_share_request_while_pending_is_ignored() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    let first = call.toggle_screen_share().expect("picker opened");
    assert!(call.toggle_screen_share().is_none());
    let follow_up = block_on(first);
    call.dispatch(follow_up);
    assert_eq!(media.count(&MediaOp::AcquireDisplay), 1);
}

#[test]
fn failed_screen_capture_is_logged_not_fatal() {
    let media = SimulatedMedia::new();
    media.deny_display_media(Some(MediaError::Other("capture failed".into())));
    let mut call = join(&media, CallConfig::default());
    share(&mut call);
    assert!(!call.session().screen_sharing());
    assert_eq!(call.session().phase(), Phase::Active);

    media.deny_display_media(None);
    share(&mut call);
    assert!(call.session().screen_sharing());
}

#[test]
fn leave_releases_camera_mic_and_screen() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    call.toggle_mic();
    call.toggle_camera();
    share(&mut call);
    assert_eq!(media.held_streams().len(), 2);

    call.leave();
    assert!(media.held_streams().is_empty());
    assert_eq!(media.output(), None);
    assert_eq!(call.session().phase(), Phase::Terminated);

    call.leave();
    assert_eq!(call.session().phase(), Phase::Terminated);
}

#[test]
fn dropping_the_view_releases_devices() {
    let media = SimulatedMedia::new();
    let call = join(&media, CallConfig::default());
    assert_eq!(media.held_streams().len(), 1);
    drop(call);
    assert!(media.held_streams().is_empty());
}

#[test]
fn commands_after_leave_do_nothing() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    call.leave();
    let ops_before = media.ops().len();
    call.toggle_mic();
    assert!(call.toggle_screen_share().is_none());
    call.tick();
    assert_eq!(media.ops().len(), ops_before);
    assert_eq!(call.session().elapsed_seconds(), 0);
}

#[test]
fn sixty_five_ticks_read_one_minute_five() {
    let media = SimulatedMedia::new();
    let mut call = join(&media, CallConfig::default());
    for _ in 0..65 {
        call.tick();
    }
    assert_eq!(call.elapsed_display(), "00:01:05");
}

#[tokio::test(start_paused = true)]
async fn clock_ticks_once_per_second() {
    let media = SimulatedMedia::new();
    let mut call = SessionController::new("m", "t", "Alice", media, CallConfig::default());
    call.apply(SessionAction::Mount).await;

    let mut clock = SessionClock::start();
    for _ in 0..3 {
        let tick = clock.next_tick().await.expect("clock running");
        call.dispatch(tick);
    }
    assert_eq!(call.session().elapsed_seconds(), 3);
}
