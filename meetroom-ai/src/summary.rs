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

//! Meeting summary prompt and schema.

use serde_json::{json, Value};

pub fn prompt(notes: &str, participants: &[String], language: &str) -> String {
    let participants = participants.join(", ");
    format!(
        "Analyze the following meeting notes and extract a concise summary and a list of action items (tasks).\n\n\
         Participants: {participants}\n\
         Notes: \"{notes}\"\n\n\
         Output JSON with 'summary' (string) and 'actionItems' (array of objects with 'description' and 'assignee').\n\
         If no specific assignee is mentioned for a task, suggest one from the participants list or use 'Unassigned'.\n\
         Language: {language}."
    )
}

pub fn schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "actionItems": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "description": { "type": "STRING" },
                        "assignee": { "type": "STRING" }
                    }
                }
            }
        },
        "required": ["summary"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_participants() {
        let text = prompt("we met", &["Ana".into(), "Ben".into()], "English");
        assert!(text.contains("Participants: Ana, Ben"));
        assert!(text.ends_with("Language: English."));
    }

    #[test]
    fn prompt_lines_carry_no_source_indentation() {
        let text = prompt("we met", &["Ana".into()], "English");
        assert!(text.contains("(tasks).\n\nParticipants: Ana\nNotes: \"we met\"\n\nOutput JSON"));
        assert!(text.lines().all(|line| !line.starts_with(' ')));
    }
}
