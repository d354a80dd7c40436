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

//! Gemini generative-language client implementing [`AiAssist`].
//!
//! Works on WASM (browser) and native targets via [`reqwest`].
//!
//! # Example
//!
//! ```no_run
//! use meetroom_ai::{AiConfig, GeminiClient};
//! use meetroom_client::AiAssist;
//!
//! # async fn example() {
//! let client = GeminiClient::new(AiConfig::from_env());
//! let agenda = client.generate_agenda("Quarterly planning", "1 hour").await;
//! for item in agenda {
//!     println!("{} ({})", item.topic, item.duration);
//! }
//! # }
//! ```

pub mod agenda;
pub mod config;
pub mod error;
pub mod summary;
mod wire;

pub use config::AiConfig;
pub use error::AiError;

use async_trait::async_trait;
use log::{debug, error, warn};
use meetroom_client::AiAssist;
use meetroom_types::{AgendaSuggestion, MeetingSummary};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt with a response schema and decode the JSON the model returns.
    ///
    /// Calls `POST {base}/v1beta/models/{model}:generateContent`.
    pub async fn generate<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let request = GenerateContentRequest::json(prompt, schema);
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..=299).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }
        let body: GenerateContentResponse = response.json().await?;
        let text = body.first_text().ok_or(AiError::EmptyResponse)?;
        debug!("model returned {} bytes", text.len());
        Ok(serde_json::from_str(text)?)
    }
}

fn log_failure(what: &str, err: &AiError) {
    match err {
        AiError::MissingApiKey => warn!("{what} skipped: {err}"),
        _ => error!("{what} failed: {err}"),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AiAssist for GeminiClient {
    async fn generate_agenda(&self, topic: &str, duration_hint: &str) -> Vec<AgendaSuggestion> {
        let prompt = agenda::prompt(topic, duration_hint, &self.config.language);
        match self.generate(prompt, agenda::schema()).await {
            Ok(items) => items,
            Err(err) => {
                log_failure("agenda generation", &err);
                Vec::new()
            }
        }
    }

    async fn generate_summary(&self, notes: &str, participants: &[String]) -> Option<MeetingSummary> {
        let prompt = summary::prompt(notes, participants, &self.config.language);
        match self.generate(prompt, summary::schema()).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                log_failure("meeting summary", &err);
                None
            }
        }
    }
}
