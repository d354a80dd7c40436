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

//! Per-call configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_VIEWPORT_WIDTH, INVITE_DELAY_MS};

/// Options for one call view. Every field has a default so a partial JSON
/// object (or none at all) is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallConfig {
    /// Microphone state when the call opens.
    pub mic_on_join: bool,
    /// Camera state when the call opens.
    pub camera_on_join: bool,
    /// Simulated network delay before an invitation is written.
    pub invite_delay_ms: u32,
    /// Reject attachments above this size. `None` accepts any size.
    pub max_attachment_bytes: Option<u64>,
    /// Used to place the right-anchored panels.
    pub viewport_width: f64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            mic_on_join: true,
            camera_on_join: true,
            invite_delay_ms: INVITE_DELAY_MS,
            max_attachment_bytes: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}
