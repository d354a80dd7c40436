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

//! Registered users and friend requests.
//!
//! Both live in the shared store and are rewritten as whole collections, so
//! two clients answering at the same moment can overwrite each other.

use std::sync::Arc;

use log::info;
use meetroom_types::{FriendRequest, FriendRequestStatus, User};
use thiserror::Error;

use crate::store::{Collection, MeetingStore, MeetingStoreExt, StoreError};
use crate::utils::random_id;

/// Role given to every self-registered account.
pub const DEFAULT_ROLE: &str = "Admin";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("an account already exists for {0}")]
    AlreadyRegistered(String),
    #[error("no user {0}")]
    UnknownUser(String),
    #[error("a friend request needs an email address")]
    EmptyEmail,
    #[error("you cannot befriend yourself")]
    SelfRequest,
    #[error("a request to {0} is already pending")]
    AlreadyPending(String),
    #[error("friend request {0} not found")]
    UnknownRequest(String),
    #[error("friend request {0} is not addressed to you")]
    NotRecipient(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct UserDirectory {
    store: Arc<dyn MeetingStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<User>, ContactError> {
        Ok(self.store.read_collection(Collection::Users)?)
    }

    pub fn find(&self, email: &str) -> Result<Option<User>, ContactError> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    pub fn register(&self, name: &str, email: &str) -> Result<User, ContactError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ContactError::EmptyEmail);
        }
        let mut users = self.all()?;
        if users.iter().any(|u| u.email == email) {
            return Err(ContactError::AlreadyRegistered(email.to_string()));
        }
        let user = User {
            email: email.to_string(),
            name: name.trim().to_string(),
            avatar: None,
            role: DEFAULT_ROLE.to_string(),
            friends: Vec::new(),
        };
        users.push(user.clone());
        self.store.write_collection(Collection::Users, &users)?;
        info!("registered {}", user.email);
        Ok(user)
    }

    /// Change display name and avatar. An empty avatar clears it.
    pub fn update_profile(&self, email: &str, name: &str, avatar: Option<&str>) -> Result<User, ContactError> {
        let mut users = self.all()?;
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| ContactError::UnknownUser(email.to_string()))?;
        user.name = name.to_string();
        user.avatar = avatar.filter(|a| !a.is_empty()).map(String::from);
        let updated = user.clone();
        self.store.write_collection(Collection::Users, &users)?;
        Ok(updated)
    }
}

pub struct Contacts {
    store: Arc<dyn MeetingStore>,
}

impl Contacts {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    fn requests(&self) -> Result<Vec<FriendRequest>, ContactError> {
        Ok(self.store.read_collection(Collection::FriendRequests)?)
    }

    pub fn send_request(&self, from: &User, to_email: &str) -> Result<FriendRequest, ContactError> {
        let to_email = to_email.trim();
        if to_email.is_empty() {
            return Err(ContactError::EmptyEmail);
        }
        if to_email == from.email {
            return Err(ContactError::SelfRequest);
        }
        let mut requests = self.requests()?;
        if requests.iter().any(|r| {
            r.from_email == from.email
                && r.to_email == to_email
                && r.status == FriendRequestStatus::Pending
        }) {
            return Err(ContactError::AlreadyPending(to_email.to_string()));
        }
        let request = FriendRequest {
            id: random_id(9),
            from_email: from.email.clone(),
            from_name: from.name.clone(),
            to_email: to_email.to_string(),
            status: FriendRequestStatus::Pending,
        };
        requests.push(request.clone());
        self.store.write_collection(Collection::FriendRequests, &requests)?;
        info!("friend request {} -> {}", request.from_email, request.to_email);
        Ok(request)
    }

    /// Requests waiting for an answer from `email`.
    pub fn pending_for(&self, email: &str) -> Result<Vec<FriendRequest>, ContactError> {
        Ok(self
            .requests()?
            .into_iter()
            .filter(|r| r.to_email == email && r.status == FriendRequestStatus::Pending)
            .collect())
    }

    /// Accept or reject a request addressed to `me`. Accepting makes the two
    /// users friends of each other.
    pub fn respond(&self, me: &str, request_id: &str, accept: bool) -> Result<FriendRequest, ContactError> {
        let mut requests = self.requests()?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| ContactError::UnknownRequest(request_id.to_string()))?;
        if request.to_email != me {
            return Err(ContactError::NotRecipient(request_id.to_string()));
        }
        request.status = if accept {
            FriendRequestStatus::Accepted
        } else {
            FriendRequestStatus::Rejected
        };
        let answered = request.clone();
        self.store.write_collection(Collection::FriendRequests, &requests)?;

        if accept {
            let mut users: Vec<User> = self.store.read_collection(Collection::Users)?;
            for user in &mut users {
                let other = if user.email == me {
                    answered.from_email.as_str()
                } else if user.email == answered.from_email {
                    me
                } else {
                    continue;
                };
                if !user.friends.iter().any(|f| f == other) {
                    user.friends.push(other.to_string());
                }
            }
            self.store.write_collection(Collection::Users, &users)?;
        }
        Ok(answered)
    }
}
