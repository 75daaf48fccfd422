// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, signup and the display profile derived from a login payload.

use checkin_report_persistence::{SessionStore, StoredUser};
use serde_json::{Map, Value};
use tracing::info;

use crate::client::ReportBackend;
use crate::error::ApiError;
use crate::request::{LoginRequest, SignupPayload, SignupRequest};
use crate::session::SessionContext;

/// Shown after a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";

/// Shown after a successful signup.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created! You can now log in.";

const FIRST_NAME_KEYS: &[&str] = &["first_name", "firstName", "given_name"];
const LAST_NAME_KEYS: &[&str] = &["last_name", "lastName", "family_name"];

/// Picks the object describing the user inside a login payload.
///
/// Prefers a `user` object, then a non-array `data` object, then the
/// payload itself.
fn user_source(payload: &Value) -> Option<&Map<String, Value>> {
    let object: &Map<String, Value> = payload.as_object()?;
    if let Some(user) = object.get("user").and_then(Value::as_object) {
        return Some(user);
    }
    if let Some(data) = object.get("data").and_then(Value::as_object) {
        return Some(data);
    }
    Some(object)
}

fn first_text<'a>(source: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| source.get(*key).and_then(Value::as_str))
}

/// Derives the display profile from a login payload.
///
/// The name is the `name` field, else first and last name joined, else
/// `fallback_email`. The email is the `email` field, else `fallback_email`.
#[must_use]
pub fn resolve_user_from_payload(payload: &Value, fallback_email: &str) -> StoredUser {
    let source: Option<&Map<String, Value>> = user_source(payload);
    let field = |key: &str| source.and_then(|source| source.get(key)).and_then(Value::as_str);

    let first_name: &str = source.and_then(|s| first_text(s, FIRST_NAME_KEYS)).unwrap_or("");
    let last_name: &str = source.and_then(|s| first_text(s, LAST_NAME_KEYS)).unwrap_or("");
    let combined: String = [first_name, last_name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
        .trim()
        .to_string();

    let name: String = field("name").map_or(combined, str::to_string);
    let name: String = if name.is_empty() {
        fallback_email.to_string()
    } else {
        name
    };

    StoredUser {
        name,
        email: field("email").unwrap_or(fallback_email).to_string(),
    }
}

/// Logs in and records the session.
///
/// # Errors
///
/// Returns an error if the form is incomplete, the API rejects the
/// credentials, or the session cannot be stored.
pub async fn login<B: ReportBackend + ?Sized, S: SessionStore>(
    backend: &B,
    session: &mut SessionContext<S>,
    request: &LoginRequest,
) -> Result<StoredUser, ApiError> {
    request.validate()?;
    let payload: Value = backend.login(request).await?;
    let user: StoredUser = resolve_user_from_payload(&payload, &request.email);
    session.login(user.clone())?;
    info!(email = %user.email, "Logged in");
    Ok(user)
}

/// Creates an account. The new user is not logged in.
///
/// # Errors
///
/// Returns an error if the form is invalid or the API rejects the signup.
pub async fn signup<B: ReportBackend + ?Sized>(
    backend: &B,
    request: &SignupRequest,
) -> Result<&'static str, ApiError> {
    let payload: SignupPayload = request.validate()?;
    backend.signup(&payload).await?;
    info!(email = %payload.email, "Account created");
    Ok(SIGNUP_SUCCESS_MESSAGE)
}
