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
use std::time::Duration;

use meetroom_client::constants::NOTIFICATION_POLL_INTERVAL_MS;
use meetroom_client::platform::now_ms;
use meetroom_client::{MeetingStore, Notification, NotificationPoller};
use tracing::{debug, warn};

use meetroom_cli::cli_args::Poll;

pub async fn poll(store: Arc<dyn MeetingStore>, opts: Poll) -> anyhow::Result<()> {
    let mut poller = NotificationPoller::new(opts.email);
    if opts.once {
        if let Some(toast) = scan(&mut poller, store.as_ref())? {
            print_toast(&toast);
        }
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_millis(NOTIFICATION_POLL_INTERVAL_MS as u64));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                poller.expire(now_ms());
                match scan(&mut poller, store.as_ref()) {
                    Ok(Some(toast)) => print_toast(&toast),
                    Ok(None) => debug!("nothing new"),
                    // Another writer may be halfway through; try again next tick.
                    Err(e) => warn!("scan failed: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn scan(poller: &mut NotificationPoller, store: &dyn MeetingStore) -> anyhow::Result<Option<Notification>> {
    let now_local = chrono::Local::now().naive_local();
    Ok(poller.scan(store, now_local, now_ms())?)
}

fn print_toast(toast: &Notification) {
    println!("[{}] {}  (meeting {})", toast.title, toast.message, toast.meeting_id);
}
