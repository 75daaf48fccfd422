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

//! API boundary for the check-in report dashboard.
//!
//! Everything that talks to the hosted Xano API or the local session store
//! lives here: request validation, the HTTP client, login and signup, and
//! the [`SessionContext`] lifecycle. Outer surfaces (the HTTP server and
//! the terminal client) call into this crate and never touch the store or
//! the network directly.

mod auth;
mod client;
mod config;
mod error;
mod report;
mod request;
mod session;
mod validation;

#[cfg(test)]
mod tests;

pub use auth::{
    LOGIN_SUCCESS_MESSAGE, SIGNUP_SUCCESS_MESSAGE, login, resolve_user_from_payload, signup,
};
pub use client::{
    ReportBackend, XanoClient, failure_message, friendly_report_message, server_message,
};
pub use config::{Config, DEFAULT_BASE_URL, LOGIN_PATH, REGIONS, REPORT_PATH, SIGNUP_PATH};
pub use error::{
    ApiError, FETCH_FALLBACK_MESSAGE, LOGIN_FALLBACK_MESSAGE, SIGNUP_FALLBACK_MESSAGE,
};
pub use report::{NO_RESULTS_MESSAGE, ReportOutcome, fetch_report};
pub use request::{
    LoginRequest, ReportQuery, ReportRequest, SignupPayload, SignupRequest, parse_request_date,
};
pub use session::{DEFAULT_DISPLAY_NAME, SessionContext};
pub use validation::ValidationError;
