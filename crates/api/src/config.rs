// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::{CsvEncoding, SchemaHints, SchemaPolicy};

/// Base URL of the hosted Xano API.
pub const DEFAULT_BASE_URL: &str = "https://xdti-9vsw-swso.e2.xano.io/api:ejSfrA89:v3.2";

/// Report endpoint, relative to the base URL.
pub const REPORT_PATH: &str = "/reports/checkin";

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Signup endpoint, relative to the base URL.
pub const SIGNUP_PATH: &str = "/auth/signup";

/// Regions a report can be requested for.
pub const REGIONS: &[&str] = &[
    "Barcelona",
    "Cotswolds",
    "French Alps",
    "London",
    "Mallorca",
    "Paris",
    "Rome",
    "South of France",
    "Tuscany",
];

/// Runtime configuration shared by the server and the terminal client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Xano API base URL without a trailing slash.
    pub base_url: String,
    /// Report API token.
    pub token: Option<String>,
    /// Reject regions outside [`REGIONS`].
    pub check_regions: bool,
    /// Explicit schema mapping for fetched reports.
    pub schema_hints: SchemaHints,
    /// Treatment of rows that diverge from the first row.
    pub schema_policy: SchemaPolicy,
    /// Encoding of CSV downloads.
    pub csv_encoding: CsvEncoding,
}

impl Config {
    /// Configuration against the hosted API with the given token.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// Uses a different API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The configured token, ignoring blank values.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Full URL of an endpoint.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The canonical spelling of `region` if it is one of [`REGIONS`].
    #[must_use]
    pub fn known_region(region: &str) -> Option<&'static str> {
        REGIONS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(region.trim()))
            .copied()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            token: None,
            check_regions: true,
            schema_hints: SchemaHints::default(),
            schema_policy: SchemaPolicy::default(),
            csv_encoding: CsvEncoding::default(),
        }
    }
}
