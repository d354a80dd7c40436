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

// Session
pub const TICK_MS: u32 = 1000;
pub const SELF_PARTICIPANT_ID: &str = "me";

// Collaboration
pub const INVITE_DELAY_MS: u32 = 1000;
pub const DEFAULT_MEETING_TITLE: &str = "meetroom meeting";

// Calculator
pub const CALC_ERROR_TEXT: &str = "Error";
pub const CALC_ERROR_CLEAR_MS: f64 = 1500.0;

// Floating panels, in CSS pixels
pub const PANEL_TOP: f64 = 80.0;
pub const CALCULATOR_LEFT: f64 = 20.0;
pub const CHAT_RIGHT_OFFSET: f64 = 350.0;
pub const PARTICIPANTS_RIGHT_OFFSET: f64 = 700.0;
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

// Notifications
pub const NOTIFICATION_POLL_INTERVAL_MS: u32 = 5000;
pub const REMINDER_WINDOW_MINUTES: f64 = 10.0;
pub const REMINDER_TOAST_MS: f64 = 8000.0;
pub const INVITE_TOAST_MS: f64 = 15000.0;
pub const INVITE_MAX_AGE_MS: f64 = 3_600_000.0;

// Store
pub const STORE_KEY_PREFIX: &str = "meetroom_";
