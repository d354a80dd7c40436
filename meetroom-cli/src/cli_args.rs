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

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

/// meetroom CLI
///
/// Works on the same collections as the browser app, stored as JSON files in
/// a local directory.
#[derive(Parser, Debug)]
#[clap(name = "meetroom")]
pub struct Opt {
    /// Directory holding the meeting store.
    #[clap(long = "store-dir", env = "MEETROOM_STORE_DIR", default_value = ".meetroom", global = true)]
    pub store_dir: PathBuf,

    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Schedule a meeting.
    Schedule(Schedule),

    /// List scheduled meetings.
    List,

    /// Join a meeting by id and mark it active.
    Join {
        meeting_id: String,
    },

    /// Start an unscheduled meeting with a random id.
    Instant,

    /// Save the notes of a meeting.
    Notes {
        meeting_id: String,
        text: String,
    },

    /// Create a user account.
    Register {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
    },

    /// Friend requests.
    #[clap(subcommand)]
    Friend(Friend),

    /// Watch for meeting reminders and invitations.
    Poll(Poll),

    /// Replace a meeting's agenda with a generated one.
    Agenda {
        meeting_id: String,
    },

    /// Summarize a meeting's notes into tasks.
    Summarize {
        meeting_id: String,
    },

    /// Run a scripted call on simulated devices.
    Call(Call),
}

#[derive(Args, Debug, Clone)]
pub struct Schedule {
    #[clap(long)]
    pub title: String,

    /// YYYY-MM-DD
    #[clap(long)]
    pub date: String,

    /// HH:MM
    #[clap(long)]
    pub start: String,

    /// HH:MM
    #[clap(long)]
    pub end: String,

    #[clap(long, default_value = "")]
    pub location: String,

    /// Comma separated names or emails.
    #[clap(long, default_value = "")]
    pub participants: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Friend {
    /// Send a request from a registered user.
    Send {
        #[clap(long)]
        from: String,
        #[clap(long)]
        to: String,
    },
    /// List requests waiting for an answer.
    Pending {
        #[clap(long)]
        email: String,
    },
    /// Accept or reject a request.
    Respond {
        #[clap(long)]
        email: String,
        #[clap(long = "request-id")]
        request_id: String,
        #[clap(long)]
        answer: Answer,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Accept,
    Reject,
}

#[derive(Error, Debug)]
pub enum ParseAnswerError {
    #[error("Invalid answer: {0} (expected accept or reject)")]
    Invalid(String),
}

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accept" | "yes" => Ok(Answer::Accept),
            "reject" | "no" => Ok(Answer::Reject),
            _ => Err(ParseAnswerError::Invalid(s.to_string())),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct Poll {
    /// Whose invitations to look for.
    #[clap(long)]
    pub email: String,

    /// Scan once and exit.
    #[clap(long)]
    pub once: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Call {
    #[clap(long = "meeting-id")]
    pub meeting_id: String,

    /// Display name of the local participant.
    #[clap(long, default_value = "Me")]
    pub name: String,

    /// Email to invite; repeat for several.
    #[clap(long = "invite")]
    pub invites: Vec<String>,

    /// How long to stay in the call.
    #[clap(long, default_value_t = 3)]
    pub seconds: u32,

    /// Share the screen for the duration of the call.
    #[clap(long)]
    pub share: bool,

    /// Join with the microphone off.
    #[clap(long)]
    pub muted: bool,

    /// Send a chat message once joined.
    #[clap(long)]
    pub say: Option<String>,
}
