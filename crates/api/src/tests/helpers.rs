// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use time::macros::date;

use crate::{
    ApiError, Config, LoginRequest, ReportBackend, ReportQuery, ReportRequest, SignupPayload,
};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

pub fn create_test_config() -> Config {
    Config::new(Some(String::from("test-token")))
}

pub fn create_test_request(region: Option<&str>) -> ReportRequest {
    ReportRequest {
        start_date: Some(date!(2024 - 03 - 01)),
        end_date: Some(date!(2024 - 03 - 31)),
        region: region.map(str::to_string),
    }
}

/// A backend returning canned responses and recording what it was sent.
#[derive(Default)]
pub struct StubBackend {
    pub report: Option<Result<Value, ApiError>>,
    pub login: Option<Result<Value, ApiError>>,
    pub signup: Option<Result<Value, ApiError>>,
    pub queries: Mutex<Vec<ReportQuery>>,
    pub logins: Mutex<Vec<LoginRequest>>,
    pub signups: Mutex<Vec<SignupPayload>>,
}

impl StubBackend {
    pub fn with_report(report: Result<Value, ApiError>) -> Self {
        Self {
            report: Some(report),
            ..Self::default()
        }
    }

    pub fn with_login(login: Result<Value, ApiError>) -> Self {
        Self {
            login: Some(login),
            ..Self::default()
        }
    }

    pub fn with_signup(signup: Result<Value, ApiError>) -> Self {
        Self {
            signup: Some(signup),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ReportBackend for StubBackend {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Value, ApiError> {
        self.queries.lock().unwrap().push(query.clone());
        self.report.clone().expect("no report response configured")
    }

    async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        self.logins.lock().unwrap().push(request.clone());
        self.login.clone().expect("no login response configured")
    }

    async fn signup(&self, payload: &SignupPayload) -> Result<Value, ApiError> {
        self.signups.lock().unwrap().push(payload.clone());
        self.signup.clone().expect("no signup response configured")
    }
}
