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

//! Platform abstraction layer.
//!
//! Cross-platform primitives that hide the differences between WASM (browser)
//! and native (desktop, CLI, tests):
//!
//! - **`now_ms()`**: current time in milliseconds since the Unix epoch
//! - **`IntervalHandle`**: a repeating timer, cancelled on drop
//! - **`spawn(future)`**: spawn an async task on the platform's executor
//! - **`sleep(ms)`**: suspend the current task for a number of milliseconds
//!
//! The implementation is selected at compile time via `cfg(target_arch = "wasm32")`.

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;
