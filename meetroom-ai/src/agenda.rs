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

//! Agenda generation prompt and schema.

use serde_json::{json, Value};

pub fn prompt(topic: &str, duration_hint: &str, language: &str) -> String {
    format!(
        "Create a professional meeting agenda for a meeting about \"{topic}\" lasting \"{duration_hint}\".\n\
         Return a JSON array of agenda items. Each item should have a 'topic' and suggested 'duration'.\n\
         Make it structured and concise. Language: {language}."
    )
}

/// An array of `{ topic, duration }` objects.
pub fn schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "topic": { "type": "STRING" },
                "duration": { "type": "STRING" }
            },
            "required": ["topic"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lines_carry_no_source_indentation() {
        let text = prompt("Q3 planning", "1 hour", "English");
        assert!(text.starts_with("Create a professional meeting agenda"));
        assert!(text.contains("\"Q3 planning\" lasting \"1 hour\".\nReturn a JSON array"));
        assert!(text.lines().all(|line| !line.starts_with(' ')));
        assert!(text.ends_with("Language: English."));
    }
}
