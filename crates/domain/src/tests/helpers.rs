// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use crate::ReportRow;

/// Builds a row from a JSON object literal.
pub fn row(value: Value) -> ReportRow {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A small reservation report with mixed directions and regions.
pub fn create_test_rows() -> Vec<ReportRow> {
    vec![
        row(json!({
            "booking_id": "B-100",
            "name": "Ana Ruiz",
            "type": "in",
            "check_in": "2024-03-01",
            "property": "villa sol",
            "destination": "Mallorca",
            "timestamp": 1_709_251_200_000_i64
        })),
        row(json!({
            "booking_id": "B-101",
            "name": "Ben Okafor",
            "type": "out",
            "check_in": "2024-02-20",
            "property": "casa luna",
            "destination": "Tuscany",
            "timestamp": 1_708_387_200_000_i64
        })),
        row(json!({
            "booking_id": "B-102",
            "name": "Chloé Martin",
            "type": "in",
            "check_in": "2024-03-05",
            "property": "le chalet",
            "destination": "French Alps",
            "timestamp": 1_709_596_800_000_i64
        })),
        row(json!({
            "booking_id": "B-103",
            "name": "Dev Patel",
            "type": "transfer",
            "check_in": "2024-03-07",
            "property": "villa sol",
            "destination": "Mallorca",
            "timestamp": 1_709_769_600_000_i64
        })),
    ]
}

/// Values of `key` across `rows`, in order.
pub fn column_values(rows: &[ReportRow], key: &str) -> Vec<String> {
    rows.iter().map(|r| crate::field_text(r, key)).collect()
}
