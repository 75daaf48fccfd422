// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a fetched report.
//!
//! The export always covers the full fetched result in fetch order, not
//! the filtered or sorted view. The header is the first row's keys in
//! their original order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::DomainError;
use crate::row::{ReportRow, value_text};

/// MIME type of the download.
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// How cells are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvEncoding {
    /// Standard CSV quoting; embedded separators, quotes and newlines are
    /// escaped so every record stays on its own logical row.
    #[default]
    Rfc4180,
    /// Every cell is the JSON encoding of its value, comma-joined without
    /// further escaping. Missing values become `""`.
    JsonCells,
}

/// A generated CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Download file name.
    pub file_name: String,
    /// File contents.
    pub content: String,
}

/// Download file name for an export made at `timestamp_ms`.
#[must_use]
pub fn csv_file_name(timestamp_ms: i128) -> String {
    format!("checkin_report_{timestamp_ms}.csv")
}

/// Renders `rows` as CSV.
///
/// Returns `Ok(None)` when there is nothing to export.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn export_csv(
    rows: &[ReportRow],
    encoding: CsvEncoding,
    timestamp_ms: i128,
) -> Result<Option<CsvExport>, DomainError> {
    let Some(first_row) = rows.first() else {
        return Ok(None);
    };
    let headers: Vec<&str> = first_row.keys().map(String::as_str).collect();

    let content: String = match encoding {
        CsvEncoding::Rfc4180 => encode_rfc4180(rows, &headers)?,
        CsvEncoding::JsonCells => encode_json_cells(rows, &headers),
    };

    debug!(
        rows = rows.len(),
        columns = headers.len(),
        encoding = ?encoding,
        "Encoded CSV export"
    );

    Ok(Some(CsvExport {
        file_name: csv_file_name(timestamp_ms),
        content,
    }))
}

fn encode_rfc4180(rows: &[ReportRow], headers: &[&str]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|header| csv_cell(row.get(*header))))?;
    }
    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|err| DomainError::CsvExport(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| DomainError::CsvExport(err.to_string()))
}

fn csv_cell(value: Option<&Value>) -> String {
    value.map(value_text).unwrap_or_default()
}

fn encode_json_cells(rows: &[ReportRow], headers: &[&str]) -> String {
    let empty: Value = Value::String(String::new());
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| {
                let value: &Value = match row.get(*header) {
                    None | Some(Value::Null) => &empty,
                    Some(value) => value,
                };
                value.to_string()
            })
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}
