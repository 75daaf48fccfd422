// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Local session storage for the check-in report dashboard.
//!
//! The dashboard keeps two values between runs: a logged-in flag and the
//! display profile of the logged-in user. Both live in a string key/value
//! store behind the [`SessionStore`] trait.
//!
//! ## Stores
//!
//! - [`FileSessionStore`]: a JSON object in the user's local data directory
//! - [`MemorySessionStore`]: process-local, used by tests and throwaway runs

mod error;
mod file;
mod memory;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use file::{FileSessionStore, default_session_path};
pub use memory::MemorySessionStore;
pub use store::{LOGGED_IN_KEY, LOGGED_IN_VALUE, SessionStore, StoredUser, USER_PROFILE_KEY};
