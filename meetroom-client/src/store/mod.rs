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

//! The meeting store: four JSON collections under fixed string keys.
//!
//! Backends only move raw strings. Typed access goes through
//! [`MeetingStoreExt`], which every backend gets for free. Writes replace the
//! whole collection; there is no merging, so concurrent writers are
//! last-writer-wins.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(feature = "wasm")]
mod local;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(feature = "wasm")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::constants::STORE_KEY_PREFIX;

/// The persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Meetings,
    Users,
    Invitations,
    FriendRequests,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Meetings,
        Collection::Users,
        Collection::Invitations,
        Collection::FriendRequests,
    ];

    /// Storage key, e.g. `meetroom_meetings`.
    pub fn key(self) -> String {
        let name = match self {
            Collection::Meetings => "meetings",
            Collection::Users => "users",
            Collection::Invitations => "invitations",
            Collection::FriendRequests => "friend_requests",
        };
        format!("{STORE_KEY_PREFIX}{name}")
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("collection {key} is not valid JSON: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Raw key/value access to the shared store.
pub trait MeetingStore: Send + Sync {
    /// `Ok(None)` when the key was never written.
    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write_raw(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Typed collection access on top of [`MeetingStore`].
pub trait MeetingStoreExt {
    /// A missing collection reads as empty.
    fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError>;
    fn write_collection<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError>;
}

impl<S: MeetingStore + ?Sized> MeetingStoreExt for S {
    fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let key = collection.key();
        match self.read_raw(&key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                warn!("failed to parse {key}: {source}");
                StoreError::Serde { key, source }
            }),
        }
    }

    fn write_collection<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        let key = collection.key();
        let raw = serde_json::to_string(items).map_err(|source| StoreError::Serde {
            key: key.clone(),
            source,
        })?;
        self.write_raw(&key, raw)
    }
}
