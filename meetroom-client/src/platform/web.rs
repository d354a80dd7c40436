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

//! WASM (browser) platform primitives.

use std::future::Future;

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// A repeating timer wrapping `gloo_timers::callback::Interval`.
/// The timer is cancelled when the handle is dropped.
pub struct IntervalHandle {
    _interval: gloo_timers::callback::Interval,
}

impl IntervalHandle {
    pub fn new<F: Fn() + 'static>(period_ms: u32, callback: F) -> Self {
        Self {
            _interval: gloo_timers::callback::Interval::new(period_ms, callback),
        }
    }
}

/// Spawn an async task on the browser's microtask queue.
///
/// The future does **not** need to be `Send` because WASM is single-threaded.
pub fn spawn<F: Future<Output = ()> + 'static>(future: F) {
    wasm_bindgen_futures::spawn_local(future);
}

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
