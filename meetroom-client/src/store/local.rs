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

//! Browser store over `window.localStorage`.

use gloo_storage::{LocalStorage, Storage};

use super::{MeetingStore, StoreError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl MeetingStore for LocalStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn write_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, &value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
