// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report::ReportMode;
use checkin_report_domain::{ReportRow, ResultSet, normalize_payload};
use serde_json::Value;
use tracing::info;

use crate::client::ReportBackend;
use crate::config::Config;
use crate::error::ApiError;
use crate::request::{ReportQuery, ReportRequest};

/// Shown when a report request succeeds with no rows.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// A fetched report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub result: ResultSet,
    /// Informational message, set when nothing was found.
    pub notice: Option<String>,
}

/// Validates `request`, fetches the report and resolves its schema.
///
/// An empty result is not an error; it carries [`NO_RESULTS_MESSAGE`].
///
/// # Errors
///
/// Returns an error if validation fails (no request is sent) or the
/// request fails.
pub async fn fetch_report<B: ReportBackend + ?Sized>(
    backend: &B,
    config: &Config,
    mode: ReportMode,
    request: &ReportRequest,
) -> Result<ReportOutcome, ApiError> {
    let query: ReportQuery = request.validate(mode, config)?;
    let payload: Value = backend.fetch_report(&query).await?;
    let rows: Vec<ReportRow> = normalize_payload(payload);
    let result: ResultSet = ResultSet::new(rows, &config.schema_hints, config.schema_policy);

    info!(
        start_date = %query.start_date,
        end_date = %query.end_date,
        destination = ?query.destination,
        rows = result.source_rows().len(),
        quarantined = result.quarantined().len(),
        "Fetched check-in report"
    );

    let notice: Option<String> = result
        .source_rows()
        .is_empty()
        .then(|| String::from(NO_RESULTS_MESSAGE));
    Ok(ReportOutcome { result, notice })
}
