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
 */

//! Shapes returned by the AI assist service.

use serde::{Deserialize, Serialize};

/// One generated agenda line, before it gets an id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgendaSuggestion {
    pub topic: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActionItem {
    pub description: String,
    #[serde(default = "unassigned")]
    pub assignee: String,
}

fn unassigned() -> String {
    "Unassigned".to_string()
}

/// Summary of meeting notes plus extracted action items.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}
