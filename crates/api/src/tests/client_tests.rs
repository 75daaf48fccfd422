// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use checkin_report::ReportMode;
use serde_json::{Value, json};

use crate::tests::helpers::{create_test_config, create_test_request, spawn_stub};
use crate::{
    ApiError, Config, FETCH_FALLBACK_MESSAGE, LOGIN_FALLBACK_MESSAGE, LoginRequest,
    ReportBackend, ReportQuery, SIGNUP_FALLBACK_MESSAGE, SignupRequest, XanoClient,
    failure_message, friendly_report_message,
};

async fn client_for(router: Router) -> XanoClient {
    let base_url: String = spawn_stub(router).await;
    XanoClient::new(&Config::default().with_base_url(&base_url)).unwrap()
}

fn rome_query() -> ReportQuery {
    create_test_request(Some("Rome"))
        .validate(ReportMode::Full, &create_test_config())
        .unwrap()
}

fn login_form() -> LoginRequest {
    LoginRequest {
        email: String::from("ana@example.com"),
        password: String::from("pw"),
    }
}

#[test]
fn test_failure_message_priority() {
    assert_eq!(
        failure_message(
            Some(String::from("server says no")),
            Some(String::from("status 500")),
            "fallback"
        ),
        "server says no"
    );
    assert_eq!(
        failure_message(None, Some(String::from("status 500")), "fallback"),
        "status 500"
    );
    assert_eq!(
        failure_message(Some(String::from(" ")), None, "fallback"),
        "fallback"
    );
}

#[test]
fn test_missing_destination_message_is_rewritten() {
    assert_eq!(
        friendly_report_message(String::from("Missing param: destination")),
        "Select Region"
    );
    assert_eq!(
        friendly_report_message(String::from("Invalid token")),
        "Invalid token"
    );
}

#[tokio::test]
async fn test_fetch_report_sends_query_parameters() {
    let router: Router = Router::new().route(
        "/reports/checkin",
        get(|Query(params): Query<BTreeMap<String, String>>| async move {
            Json(json!({"data": [params]}))
        }),
    );
    let client: XanoClient = client_for(router).await;

    let payload: Value = client.fetch_report(&rome_query()).await.unwrap();

    assert_eq!(
        payload,
        json!({"data": [{
            "destination": "Rome",
            "end_date": "2024-03-31",
            "format": "json",
            "start_date": "2024-03-01",
            "token": "test-token"
        }]})
    );
}

#[tokio::test]
async fn test_fetch_report_server_message_wins() {
    let router: Router = Router::new().route(
        "/reports/checkin",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"code": "ERROR_CODE_INPUT_ERROR", "message": "Missing param: destination"})),
            )
        }),
    );
    let client: XanoClient = client_for(router).await;

    let err: ApiError = client.fetch_report(&rome_query()).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::RequestFailed {
            status: Some(400),
            message: String::from("Select Region"),
        }
    );
}

#[tokio::test]
async fn test_fetch_report_without_server_message_uses_status_text() {
    let router: Router = Router::new().route(
        "/reports/checkin",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client: XanoClient = client_for(router).await;

    let err: ApiError = client.fetch_report(&rome_query()).await.unwrap_err();
    let message: String = err.message();

    assert!(message.contains("500"), "unexpected message: {message}");
    assert_ne!(message, FETCH_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_fetch_report_unreachable_host() {
    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address: std::net::SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    let client: XanoClient =
        XanoClient::new(&Config::default().with_base_url(&format!("http://{address}"))).unwrap();

    let err: ApiError = client.fetch_report(&rome_query()).await.unwrap_err();

    match err {
        ApiError::RequestFailed { status, message } => {
            assert_eq!(status, None);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_report_non_json_body_is_not_an_error() {
    let router: Router = Router::new().route("/reports/checkin", get(|| async { "no rows" }));
    let client: XanoClient = client_for(router).await;

    let payload: Value = client.fetch_report(&rome_query()).await.unwrap();

    assert_eq!(payload, json!("no rows"));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let router: Router = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<Value>| async move {
            Json(json!({"authToken": "t", "echo": body}))
        }),
    );
    let client: XanoClient = client_for(router).await;

    let payload: Value = client.login(&login_form()).await.unwrap();

    assert_eq!(
        payload["echo"],
        json!({"email": "ana@example.com", "password": "pw"})
    );
}

#[tokio::test]
async fn test_login_rejection_uses_server_message_or_fallback() {
    let with_message: Router = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({"message": "Invalid Credentials."})),
            )
        }),
    );
    let without_message: Router = Router::new().route(
        "/auth/login",
        post(|| async { (StatusCode::FORBIDDEN, Json(json!({}))) }),
    );

    let first: ApiError = client_for(with_message)
        .await
        .login(&login_form())
        .await
        .unwrap_err();
    let second: ApiError = client_for(without_message)
        .await
        .login(&login_form())
        .await
        .unwrap_err();

    assert_eq!(first.message(), "Invalid Credentials.");
    assert_eq!(second.message(), LOGIN_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_signup_rejection_fallback() {
    let router: Router = Router::new().route(
        "/auth/signup",
        post(|| async { (StatusCode::BAD_REQUEST, "not json") }),
    );
    let client: XanoClient = client_for(router).await;
    let payload = SignupRequest {
        first_name: String::from("Ana"),
        last_name: String::from("Ruiz"),
        email: String::from("ana@example.com"),
        password: String::from("pw"),
        confirm_password: String::from("pw"),
    }
    .validate()
    .unwrap();

    let err: ApiError = client.signup(&payload).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::RequestFailed {
            status: Some(400),
            message: String::from(SIGNUP_FALLBACK_MESSAGE),
        }
    );
}
