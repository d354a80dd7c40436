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

//! Client configuration loaded from environment variables.

use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// `None` disables every call; results are then always empty.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Language the model is asked to answer in.
    pub language: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `GEMINI_API_KEY`, falling back to `API_KEY`
    /// - `GEMINI_MODEL` (default: `"gemini-2.5-flash"`)
    /// - `GEMINI_BASE_URL` (default: the public endpoint)
    /// - `AI_LANGUAGE` (default: `"English"`)
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());
        let defaults = Self::default();
        Self {
            api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            model: var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            language: var("AI_LANGUAGE").unwrap_or(defaults.language),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
