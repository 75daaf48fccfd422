// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The local session lifecycle.

use checkin_report_persistence::{
    LOGGED_IN_KEY, LOGGED_IN_VALUE, SessionStore, StoredUser, USER_PROFILE_KEY,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Label shown when no profile name is known.
pub const DEFAULT_DISPLAY_NAME: &str = "Account Profile";

/// The logged-in flag and display profile.
///
/// This is the only component that reads or writes the session store.
/// Create it with [`SessionContext::restore`] at startup and call
/// [`SessionContext::logout`] to tear it down.
#[derive(Debug)]
pub struct SessionContext<S: SessionStore> {
    store: S,
    logged_in: bool,
    user: Option<StoredUser>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Loads the session from `store`.
    ///
    /// A profile that is not valid JSON is removed and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(mut store: S) -> Result<Self, ApiError> {
        let logged_in: bool = store.get(LOGGED_IN_KEY)?.as_deref() == Some(LOGGED_IN_VALUE);
        let user: Option<StoredUser> = match store.get(USER_PROFILE_KEY)? {
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => profile_from_value(&value),
                Err(err) => {
                    warn!(error = %err, "Removing unreadable stored profile");
                    store.remove(USER_PROFILE_KEY)?;
                    None
                }
            },
            None => None,
        };

        debug!(logged_in, has_profile = user.is_some(), "Restored session");

        Ok(Self {
            store,
            logged_in,
            user,
        })
    }

    /// Marks the session logged in and stores the profile.
    ///
    /// Both keys are written as one change, so a failed write never leaves
    /// the flag set without a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn login(&mut self, user: StoredUser) -> Result<(), ApiError> {
        let profile: String = serde_json::to_string(&user).map_err(|err| {
            ApiError::Session(checkin_report_persistence::PersistenceError::from(err))
        })?;
        self.store.set_many(&[
            (LOGGED_IN_KEY, LOGGED_IN_VALUE),
            (USER_PROFILE_KEY, profile.as_str()),
        ])?;
        self.logged_in = true;
        self.user = Some(user);
        Ok(())
    }

    /// Clears the flag and the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.store.remove(LOGGED_IN_KEY)?;
        self.store.remove(USER_PROFILE_KEY)?;
        self.logged_in = false;
        self.user = None;
        debug!("Cleared session");
        Ok(())
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    #[must_use]
    pub const fn user(&self) -> Option<&StoredUser> {
        self.user.as_ref()
    }

    /// The stored name, or [`DEFAULT_DISPLAY_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }
}

/// Reads a profile object, tolerating missing or mistyped fields.
fn profile_from_value(value: &Value) -> Option<StoredUser> {
    let object = value.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(StoredUser {
        name: text("name"),
        email: text("email"),
    })
}
