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

use std::sync::Arc;

use anyhow::anyhow;
use meetroom_client::{Contacts, MeetingStore, UserDirectory};

use meetroom_cli::cli_args::{Answer, Friend};

pub fn register(store: Arc<dyn MeetingStore>, name: &str, email: &str) -> anyhow::Result<()> {
    let user = UserDirectory::new(store).register(name, email)?;
    println!("Registered {} <{}>", user.name, user.email);
    Ok(())
}

pub fn friend(store: Arc<dyn MeetingStore>, cmd: Friend) -> anyhow::Result<()> {
    let contacts = Contacts::new(store.clone());
    match cmd {
        Friend::Send { from, to } => {
            let sender = UserDirectory::new(store)
                .find(&from)?
                .ok_or_else(|| anyhow!("{from} is not registered"))?;
            let request = contacts.send_request(&sender, &to)?;
            println!("Request {} sent to {}", request.id, request.to_email);
        }
        Friend::Pending { email } => {
            let pending = contacts.pending_for(&email)?;
            if pending.is_empty() {
                println!("No pending requests.");
            }
            for request in pending {
                println!("{}  from {} <{}>", request.id, request.from_name, request.from_email);
            }
        }
        Friend::Respond {
            email,
            request_id,
            answer,
        } => {
            let request = contacts.respond(&email, &request_id, answer == Answer::Accept)?;
            println!("Request {} is now {:?}", request.id, request.status);
        }
    }
    Ok(())
}
