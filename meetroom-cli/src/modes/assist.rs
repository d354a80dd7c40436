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

use meetroom_ai::{AiConfig, GeminiClient};
use meetroom_client::assist::{suggest_agenda, summarize_notes};
use meetroom_client::{MeetingBook, MeetingStore};
use tracing::warn;

fn client() -> GeminiClient {
    let config = AiConfig::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, the meeting will not change");
    }
    GeminiClient::new(config)
}

pub async fn agenda(store: Arc<dyn MeetingStore>, meeting_id: &str) -> anyhow::Result<()> {
    let book = MeetingBook::new(store);
    let meeting = suggest_agenda(&client(), &book, meeting_id).await?;
    for item in &meeting.agenda {
        println!("- {} ({})", item.topic, item.duration);
    }
    Ok(())
}

pub async fn summarize(store: Arc<dyn MeetingStore>, meeting_id: &str) -> anyhow::Result<()> {
    let book = MeetingBook::new(store);
    let meeting = summarize_notes(&client(), &book, meeting_id).await?;
    println!("{}", meeting.notes);
    for task in &meeting.tasks {
        println!("[{:?}] {} -> {}", task.status, task.description, task.assignee);
    }
    Ok(())
}
