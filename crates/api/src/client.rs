// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP access to the hosted Xano API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, LOGIN_PATH, REPORT_PATH, SIGNUP_PATH};
use crate::error::{ApiError, FETCH_FALLBACK_MESSAGE, LOGIN_FALLBACK_MESSAGE, SIGNUP_FALLBACK_MESSAGE};
use crate::request::{LoginRequest, ReportQuery, SignupPayload};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Server text that means the region was left out.
const MISSING_DESTINATION: &str = "Missing param: destination";

/// The remote operations the dashboard depends on.
///
/// Every method sends exactly one request; there are no retries.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Fetches the raw report payload.
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Value, ApiError>;

    /// Submits credentials and returns the login payload.
    async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError>;

    /// Creates an account and returns the signup payload.
    async fn signup(&self, payload: &SignupPayload) -> Result<Value, ApiError>;
}

/// Picks the message shown for a failed request.
///
/// A server-provided message wins, then the transport error text, then
/// `fallback`.
#[must_use]
pub fn failure_message(
    server_message: Option<String>,
    transport_message: Option<String>,
    fallback: &str,
) -> String {
    server_message
        .into_iter()
        .chain(transport_message)
        .find(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// The `message` field of an error body, if any.
#[must_use]
pub fn server_message(body: Option<&Value>) -> Option<String> {
    body?
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Rewrites server report errors into the text the form shows.
#[must_use]
pub fn friendly_report_message(message: String) -> String {
    if message.contains(MISSING_DESTINATION) {
        String::from("Select Region")
    } else {
        message
    }
}

/// Client for the hosted Xano API.
#[derive(Debug, Clone)]
pub struct XanoClient {
    http: reqwest::Client,
    base_url: String,
}

impl XanoClient {
    /// Builds a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("checkin-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::RequestFailed {
                status: None,
                message: err.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<T: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let url: String = self.endpoint(path);
        let response: reqwest::Response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport_failure(&err, fallback))?;

        let status: reqwest::StatusCode = response.status();
        let text: String = response
            .text()
            .await
            .map_err(|err| transport_failure(&err, fallback))?;
        let parsed: Result<Value, serde_json::Error> = serde_json::from_str(&text);

        if !status.is_success() {
            let message: String =
                failure_message(server_message(parsed.as_ref().ok()), None, fallback);
            warn!(path, status = status.as_u16(), message = %message, "Auth request rejected");
            return Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message,
            });
        }

        parsed.map_err(|err| ApiError::RequestFailed {
            status: Some(status.as_u16()),
            message: failure_message(None, Some(err.to_string()), fallback),
        })
    }
}

fn transport_failure(err: &reqwest::Error, fallback: &str) -> ApiError {
    warn!(error = %err, "Request to Xano failed");
    ApiError::RequestFailed {
        status: err.status().map(|status| status.as_u16()),
        message: failure_message(None, Some(err.to_string()), fallback),
    }
}

#[async_trait]
impl ReportBackend for XanoClient {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Value, ApiError> {
        let url: String = self.endpoint(REPORT_PATH);
        debug!(
            url = %url,
            start_date = %query.start_date,
            end_date = %query.end_date,
            destination = ?query.destination,
            "Requesting check-in report"
        );

        let response: reqwest::Response = self
            .http
            .get(&url)
            .query(&query.params())
            .send()
            .await
            .map_err(|err| transport_failure(&err, FETCH_FALLBACK_MESSAGE))?;

        let status: reqwest::StatusCode = response.status();
        let transport_message: Option<String> = response
            .error_for_status_ref()
            .err()
            .map(|err| err.to_string());
        let text: String = response
            .text()
            .await
            .map_err(|err| transport_failure(&err, FETCH_FALLBACK_MESSAGE))?;

        if !status.is_success() {
            let body: Option<Value> = serde_json::from_str(&text).ok();
            let message: String = friendly_report_message(failure_message(
                server_message(body.as_ref()),
                transport_message,
                FETCH_FALLBACK_MESSAGE,
            ));
            warn!(status = status.as_u16(), message = %message, "Report request failed");
            return Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message,
            });
        }

        // A body that is not JSON normalizes to no rows.
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        debug!(email = %request.email, "Submitting login");
        self.post_json(LOGIN_PATH, request, LOGIN_FALLBACK_MESSAGE)
            .await
    }

    async fn signup(&self, payload: &SignupPayload) -> Result<Value, ApiError> {
        debug!(email = %payload.email, "Submitting signup");
        self.post_json(SIGNUP_PATH, payload, SIGNUP_FALLBACK_MESSAGE)
            .await
    }
}
