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

use clap::Parser;
mod modes;

use meetroom_cli::cli_args::{Mode, Opt};
use meetroom_client::{JsonFileStore, MeetingStore};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish()
        .try_init()?;

    let opt = Opt::parse();
    debug!("using store at {}", opt.store_dir.display());
    let store: Arc<dyn MeetingStore> = Arc::new(JsonFileStore::open(&opt.store_dir)?);

    match opt.mode {
        Mode::Schedule(s) => modes::meetings::schedule(store, s)?,
        Mode::List => modes::meetings::list(store)?,
        Mode::Join { meeting_id } => modes::meetings::join(store, &meeting_id)?,
        Mode::Instant => modes::meetings::instant(store)?,
        Mode::Notes { meeting_id, text } => modes::meetings::notes(store, &meeting_id, &text)?,
        Mode::Register { name, email } => modes::friends::register(store, &name, &email)?,
        Mode::Friend(cmd) => modes::friends::friend(store, cmd)?,
        Mode::Poll(p) => modes::poll::poll(store, p).await?,
        Mode::Agenda { meeting_id } => modes::assist::agenda(store, &meeting_id).await?,
        Mode::Summarize { meeting_id } => modes::assist::summarize(store, &meeting_id).await?,
        Mode::Call(c) => modes::call::call(store, c).await?,
    };

    Ok(())
}
