// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login enforcement for report routes.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use checkin_report_persistence::StoredUser;
use tracing::debug;

use crate::{AppState, ErrorResponse};

/// Extractor for routes that need a logged-in session.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     LoggedIn(user): LoggedIn,
/// ) -> Result<Json<Response>, HttpError> {
///     // user: Option<StoredUser>, the stored display profile
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the session is not logged in.
pub struct LoggedIn(pub Option<StoredUser>);

impl FromRequestParts<AppState> for LoggedIn {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.session.lock().await;
        if !session.is_logged_in() {
            debug!(path = %parts.uri.path(), "Rejected request without a session");
            return Err(SessionError::NotLoggedIn);
        }
        Ok(Self(session.user().cloned()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No one is logged in.
    NotLoggedIn,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::NotLoggedIn => "Please log in to view reports.",
        };
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: message.to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
