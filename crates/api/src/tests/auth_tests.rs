// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_persistence::{MemorySessionStore, StoredUser};
use serde_json::json;

use crate::tests::helpers::StubBackend;
use crate::{
    ApiError, LoginRequest, SIGNUP_SUCCESS_MESSAGE, SessionContext, SignupRequest,
    ValidationError, login, resolve_user_from_payload, signup,
};

fn login_form() -> LoginRequest {
    LoginRequest {
        email: String::from("ana@example.com"),
        password: String::from("pw"),
    }
}

fn empty_session() -> SessionContext<MemorySessionStore> {
    SessionContext::restore(MemorySessionStore::new()).unwrap()
}

#[test]
fn test_resolve_prefers_user_object() {
    let payload = json!({
        "authToken": "abc",
        "user": {"name": "Ana Ruiz", "email": "ana@valeria.test"},
        "data": {"name": "Ignored"}
    });

    let user: StoredUser = resolve_user_from_payload(&payload, "typed@example.com");

    assert_eq!(user.name, "Ana Ruiz");
    assert_eq!(user.email, "ana@valeria.test");
}

#[test]
fn test_resolve_uses_data_object_but_not_array() {
    let from_object: StoredUser =
        resolve_user_from_payload(&json!({"data": {"firstName": "Ben"}}), "ben@example.com");
    let from_array: StoredUser = resolve_user_from_payload(
        &json!({"data": [{"name": "Nope"}], "given_name": "Chloé", "family_name": "Martin"}),
        "chloe@example.com",
    );

    assert_eq!(from_object.name, "Ben");
    assert_eq!(from_object.email, "ben@example.com");
    assert_eq!(from_array.name, "Chloé Martin");
}

#[test]
fn test_resolve_joins_first_and_last_name() {
    let user: StoredUser = resolve_user_from_payload(
        &json!({"first_name": "Dev", "last_name": "Patel", "email": "dev@example.com"}),
        "fallback@example.com",
    );

    assert_eq!(user.name, "Dev Patel");
    assert_eq!(user.email, "dev@example.com");
}

#[test]
fn test_resolve_falls_back_to_email() {
    let no_names: StoredUser = resolve_user_from_payload(&json!({"id": 7}), "x@example.com");
    let empty_name: StoredUser =
        resolve_user_from_payload(&json!({"name": "", "first_name": "Eve"}), "y@example.com");
    let not_object: StoredUser = resolve_user_from_payload(&json!("token"), "z@example.com");

    assert_eq!(no_names.name, "x@example.com");
    assert_eq!(empty_name.name, "y@example.com");
    assert_eq!(not_object.name, "z@example.com");
    assert_eq!(not_object.email, "z@example.com");
}

#[tokio::test]
async fn test_login_stores_resolved_user() {
    let backend: StubBackend =
        StubBackend::with_login(Ok(json!({"user": {"first_name": "Ana", "last_name": "Ruiz"}})));
    let mut session: SessionContext<MemorySessionStore> = empty_session();

    let user: StoredUser = login(&backend, &mut session, &login_form()).await.unwrap();

    assert_eq!(user.name, "Ana Ruiz");
    assert_eq!(user.email, "ana@example.com");
    assert!(session.is_logged_in());
    assert_eq!(session.display_name(), "Ana Ruiz");
    assert_eq!(backend.logins.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_validation_sends_nothing() {
    let backend: StubBackend = StubBackend::default();
    let mut session: SessionContext<MemorySessionStore> = empty_session();
    let form: LoginRequest = LoginRequest {
        email: String::new(),
        password: String::from("pw"),
    };

    let result: Result<StoredUser, ApiError> = login(&backend, &mut session, &form).await;

    assert_eq!(
        result,
        Err(ApiError::InvalidInput(ValidationError::MissingCredentials))
    );
    assert!(backend.logins.lock().unwrap().is_empty());
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_untouched() {
    let backend: StubBackend = StubBackend::with_login(Err(ApiError::RequestFailed {
        status: Some(401),
        message: String::from("Invalid Credentials."),
    }));
    let mut session: SessionContext<MemorySessionStore> = empty_session();

    let result: Result<StoredUser, ApiError> = login(&backend, &mut session, &login_form()).await;

    assert_eq!(result.unwrap_err().message(), "Invalid Credentials.");
    assert!(!session.is_logged_in());
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_signup_does_not_log_in() {
    let backend: StubBackend = StubBackend::with_signup(Ok(json!({"id": 12})));
    let form: SignupRequest = SignupRequest {
        first_name: String::from("Ana"),
        last_name: String::from("Ruiz"),
        email: String::from("ana@example.com"),
        password: String::from("pw"),
        confirm_password: String::from("pw"),
    };

    let message: &str = signup(&backend, &form).await.unwrap();

    assert_eq!(message, SIGNUP_SUCCESS_MESSAGE);
    assert_eq!(message, "Account created! You can now log in.");
    assert_eq!(backend.signups.lock().unwrap()[0].first_name, "Ana");
}

#[tokio::test]
async fn test_signup_mismatch_sends_nothing() {
    let backend: StubBackend = StubBackend::default();
    let form: SignupRequest = SignupRequest {
        first_name: String::from("Ana"),
        last_name: String::from("Ruiz"),
        email: String::from("ana@example.com"),
        password: String::from("pw"),
        confirm_password: String::from("pw2"),
    };

    let result: Result<&str, ApiError> = signup(&backend, &form).await;

    assert_eq!(
        result,
        Err(ApiError::InvalidInput(ValidationError::PasswordMismatch))
    );
    assert!(backend.signups.lock().unwrap().is_empty());
}
