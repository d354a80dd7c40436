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

//! Native platform primitives backed by `std::time` and `tokio`.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as f64
}

/// A repeating timer that runs `callback` every `period_ms` on a tokio task.
///
/// Dropping the handle aborts the task. A tokio runtime must be active when
/// the timer is created.
pub struct IntervalHandle {
    task: tokio::task::JoinHandle<()>,
}

impl IntervalHandle {
    pub fn new<F: FnMut() + Send + 'static>(period_ms: u32, mut callback: F) -> Self {
        let period = Duration::from_millis(period_ms as u64);
        let start = tokio::time::Instant::now() + period;
        let task = tokio::spawn(async move {
            // Starting one period out matches the browser interval, which never fires at 0.
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                callback();
            }
        });
        Self { task }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn an async task on the tokio runtime.
pub fn spawn<F: Future<Output = ()> + Send + 'static>(future: F) {
    tokio::spawn(future);
}

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep(ms: u32) {
    tokio::time::sleep(Duration::from_millis(ms as u64)).await;
}
