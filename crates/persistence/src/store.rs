// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Key of the logged-in flag.
pub const LOGGED_IN_KEY: &str = "valeria_is_logged_in";

/// Value stored under [`LOGGED_IN_KEY`] while logged in.
pub const LOGGED_IN_VALUE: &str = "true";

/// Key of the stored display profile.
pub const USER_PROFILE_KEY: &str = "valeria_user_profile";

/// The display profile kept for the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub name: String,
    pub email: String,
}

/// Durable string key/value storage for the local session.
pub trait SessionStore {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Writes several values as one change: either all are stored or, on
    /// error, none are.
    ///
    /// The default writes them one at a time, which is only all-or-nothing
    /// for stores whose `set` cannot fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        (**self).set_many(entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
