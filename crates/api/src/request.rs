// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report, login and signup requests and their validation.

use checkin_report::ReportMode;
use checkin_report_domain::{QUERY_DATE_FORMAT, format_query_date};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::config::Config;
use crate::validation::ValidationError;

/// Parses an optional `YYYY-MM-DD` date; blank input is `None`.
///
/// # Errors
///
/// Returns an error if the text is not blank and not a valid date.
pub fn parse_request_date(text: Option<&str>) -> Result<Option<Date>, ValidationError> {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    Date::parse(text, QUERY_DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            value: text.to_string(),
        })
}

/// A report request as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Blank means all regions, which only the simple view allows.
    pub region: Option<String>,
}

/// A validated report request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub token: String,
    pub start_date: Date,
    pub end_date: Date,
    /// `None` omits the `destination` parameter.
    pub destination: Option<String>,
}

impl ReportRequest {
    /// Checks the request in the order the user sees the messages.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either date is missing
    /// - The region is blank on the full view
    /// - No API token is configured
    /// - Region checking is on and the region is unknown
    pub fn validate(&self, mode: ReportMode, config: &Config) -> Result<ReportQuery, ValidationError> {
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(ValidationError::MissingDates);
        };

        let region: Option<&str> = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty());
        if region.is_none() && mode.requires_region() {
            return Err(ValidationError::MissingRegion);
        }

        let Some(token) = config.token() else {
            return Err(ValidationError::MissingToken);
        };

        let destination: Option<String> = match region {
            Some(region) if config.check_regions => Some(
                Config::known_region(region)
                    .ok_or_else(|| ValidationError::UnknownRegion {
                        region: region.to_string(),
                    })?
                    .to_string(),
            ),
            Some(region) => Some(region.to_string()),
            None => None,
        };

        Ok(ReportQuery {
            token: token.to_string(),
            start_date,
            end_date,
            destination,
        })
    }
}

impl ReportQuery {
    /// Query string parameters, in the order they are sent.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![
            ("token", self.token.clone()),
            ("start_date", format_query_date(self.start_date)),
            ("end_date", format_query_date(self.end_date)),
        ];
        if let Some(destination) = &self.destination {
            params.push(("destination", destination.clone()));
        }
        params.push(("format", String::from("json")));
        params
    }
}

/// Login form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// # Errors
    ///
    /// Returns an error if the email or password is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

/// Signup form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// The body posted to the signup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Validates the form and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty or the passwords differ.
    pub fn validate(&self) -> Result<SignupPayload, ValidationError> {
        let fields: [&str; 5] = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::IncompleteSignup);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(SignupPayload {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
