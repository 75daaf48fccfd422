// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input checks that run before any request is sent.

use thiserror::Error;

/// Input rejected before contacting the API.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A report needs both dates.
    #[error("Please select both start and end dates.")]
    MissingDates,

    /// A date could not be read as `YYYY-MM-DD`.
    #[error("Invalid date format: {value}")]
    InvalidDate { value: String },

    /// The full report needs a region.
    #[error("Select Region")]
    MissingRegion,

    /// The region is not one the dashboard offers.
    #[error("Unknown region: {region}")]
    UnknownRegion { region: String },

    /// No API token is configured.
    #[error("Missing API token. Set XANO_TOKEN.")]
    MissingToken,

    /// Login needs an email and a password.
    #[error("Please provide both email and password.")]
    MissingCredentials,

    /// Signup needs every field.
    #[error("Please complete every field to create your account.")]
    IncompleteSignup,

    /// Signup password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,
}
