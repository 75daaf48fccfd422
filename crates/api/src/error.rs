// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use checkin_report_persistence::PersistenceError;

use crate::validation::ValidationError;

/// Shown when a report request fails without any other explanation.
pub const FETCH_FALLBACK_MESSAGE: &str = "Error fetching data.";

/// Shown when login fails without a server message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Unable to log in. Please try again.";

/// Shown when signup fails without a server message.
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Unable to create your account.";

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input was rejected before any request was sent.
    InvalidInput(ValidationError),
    /// The remote API could not be reached or refused the request.
    RequestFailed {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// The message shown to the user.
        message: String,
    },
    /// The local session store failed.
    Session(PersistenceError),
}

impl ApiError {
    /// The text shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(err) => err.to_string(),
            Self::RequestFailed { message, .. } => message.clone(),
            Self::Session(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::RequestFailed {
                status: Some(status),
                message,
            } => write!(f, "Request failed ({status}): {message}"),
            Self::RequestFailed {
                status: None,
                message,
            } => write!(f, "Request failed: {message}"),
            Self::Session(err) => write!(f, "Session error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Session(err)
    }
}
