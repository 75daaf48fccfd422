// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Header labels and cell text.

use serde_json::Value;

use crate::row::value_text;

/// Display label for a column header.
#[must_use]
pub fn header_label(key: &str) -> String {
    let normalized: String = key.replace('_', " ");
    if normalized.trim().eq_ignore_ascii_case("in/out") {
        return String::from("Check In/Out");
    }
    if normalized.eq_ignore_ascii_case("property") {
        return String::from("PROPERTY");
    }
    normalized
}

/// Display text for a cell.
#[must_use]
pub fn format_cell(column: &str, value: Option<&Value>) -> String {
    let text: String = value.map(value_text).unwrap_or_default();
    if text.is_empty() {
        return text;
    }
    if text.trim().eq_ignore_ascii_case("homeowner") {
        return String::from("Homeowner");
    }
    if column.eq_ignore_ascii_case("property") {
        return text.to_uppercase();
    }
    text
}
