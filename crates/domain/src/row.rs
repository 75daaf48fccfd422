// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report rows and payload normalization.

use serde_json::{Map, Value};
use tracing::debug;

/// One reservation record returned by the reporting API.
///
/// Field order is the order the API returned, which is significant for
/// column derivation and CSV export.
pub type ReportRow = Map<String, Value>;

/// Flattens the three response shapes the reporting endpoint produces.
///
/// - a bare array of rows
/// - an object carrying a `data` array
/// - a single object, treated as a one-row result
///
/// Any other shape (null, scalars) yields no rows. Array elements that are
/// not objects are skipped.
#[must_use]
pub fn normalize_payload(payload: Value) -> Vec<ReportRow> {
    match payload {
        Value::Array(items) => collect_objects(items),
        Value::Object(mut object) => {
            if matches!(object.get("data"), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = object.remove("data") {
                    return collect_objects(items);
                }
            }
            vec![object]
        }
        other => {
            debug!(kind = value_kind(&other), "Report payload has no rows");
            Vec::new()
        }
    }
}

fn collect_objects(items: Vec<Value>) -> Vec<ReportRow> {
    let total: usize = items.len();
    let rows: Vec<ReportRow> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect();
    if rows.len() != total {
        debug!(
            skipped = total - rows.len(),
            "Skipped non-object entries in report payload"
        );
    }
    rows
}

/// Plain string form of a cell value.
///
/// Strings render unquoted, numbers and booleans as literals, null as an
/// empty string, and nested arrays/objects as compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// String form of the value at `key`, with a missing field reading as empty.
#[must_use]
pub fn field_text(row: &ReportRow, key: &str) -> String {
    row.get(key).map(value_text).unwrap_or_default()
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
