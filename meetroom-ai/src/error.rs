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

//! Error types for the Gemini client.

use thiserror::Error;

/// Errors from [`GeminiClient::generate`](crate::GeminiClient::generate).
///
/// The [`AiAssist`](meetroom_client::AiAssist) methods log these and return
/// empty results instead.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response had no candidate text.
    #[error("empty model response")]
    EmptyResponse,

    /// The candidate text did not match the requested schema.
    #[error("model output is not the expected JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
