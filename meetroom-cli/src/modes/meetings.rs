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

use std::sync::Arc;

use meetroom_client::platform::now_ms;
use meetroom_client::{MeetingBook, MeetingStore, NewMeeting};
use meetroom_types::Meeting;
use tracing::info;

use meetroom_cli::cli_args::Schedule;

pub fn schedule(store: Arc<dyn MeetingStore>, s: Schedule) -> anyhow::Result<()> {
    let book = MeetingBook::new(store);
    let meeting = book.create(
        NewMeeting {
            title: s.title,
            date: s.date,
            start_time: s.start,
            end_time: s.end,
            location: s.location,
            participants: s.participants,
            agenda: Vec::new(),
        },
        now_ms(),
    )?;
    println!("Scheduled {}", line(&meeting));
    Ok(())
}

pub fn list(store: Arc<dyn MeetingStore>) -> anyhow::Result<()> {
    let meetings = MeetingBook::new(store).list()?;
    if meetings.is_empty() {
        println!("No meetings scheduled.");
    }
    for meeting in &meetings {
        println!("{}", line(meeting));
        for item in &meeting.agenda {
            let mark = if item.completed { "x" } else { " " };
            println!("    [{mark}] {} ({})", item.topic, item.duration);
        }
    }
    Ok(())
}

pub fn join(store: Arc<dyn MeetingStore>, meeting_id: &str) -> anyhow::Result<()> {
    let target = MeetingBook::new(store).join(meeting_id)?;
    match target.title {
        Some(title) => println!("Joined \"{title}\" ({})", target.meeting_id),
        None => println!("Joined {} (not in the store)", target.meeting_id),
    }
    Ok(())
}

pub fn instant(store: Arc<dyn MeetingStore>) -> anyhow::Result<()> {
    let target = MeetingBook::new(store).start_instant();
    info!("instant meeting {}", target.meeting_id);
    println!("Meeting code: {}", target.meeting_id);
    Ok(())
}

pub fn notes(store: Arc<dyn MeetingStore>, meeting_id: &str, text: &str) -> anyhow::Result<()> {
    let meeting = MeetingBook::new(store).save_notes(meeting_id, text)?;
    println!("Saved notes for {}", line(&meeting));
    Ok(())
}

fn line(m: &Meeting) -> String {
    format!(
        "{}  {} {}-{}  {:?}  {}",
        m.id, m.date, m.start_time, m.end_time, m.status, m.title
    )
}
