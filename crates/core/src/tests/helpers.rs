// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::{ReportRow, ResultSet, SchemaHints, SchemaPolicy};
use serde_json::{Value, json};

use crate::{ReportMode, ViewCommand, ViewState, apply};

pub fn row(value: Value) -> ReportRow {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// `count` reservations alternating between check-ins and check-outs.
pub fn create_test_rows(count: usize) -> Vec<ReportRow> {
    (0..count)
        .map(|n| {
            row(json!({
                "booking_id": format!("B-{n:03}"),
                "name": format!("Guest {n:03}"),
                "type": if n % 2 == 0 { "in" } else { "out" },
                "check_in": "2024-06-01",
                "destination": if n == 3 { "Mallorca" } else { "Tuscany" },
                "timestamp": 1_717_200_000_000_i64
            }))
        })
        .collect()
}

pub fn create_result_set(rows: Vec<ReportRow>) -> ResultSet {
    ResultSet::new(rows, &SchemaHints::default(), SchemaPolicy::Lenient)
}

/// A full-mode view loaded with `count` test rows.
pub fn create_loaded_state(count: usize) -> ViewState {
    let state: ViewState = ViewState::new(ReportMode::Full);
    apply(
        &state,
        ViewCommand::Load(create_result_set(create_test_rows(count))),
    )
    .unwrap()
}
