// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::tests::helpers::{create_test_rows, row};
use crate::{CsvEncoding, CsvExport, ReportRow, export_csv};

const STAMP: i128 = 1_717_171_717_000;

#[test]
fn test_export_of_empty_data_is_none() {
    assert_eq!(export_csv(&[], CsvEncoding::Rfc4180, STAMP).unwrap(), None);
    assert_eq!(export_csv(&[], CsvEncoding::JsonCells, STAMP).unwrap(), None);
}

#[test]
fn test_export_file_name_is_timestamped() {
    let export: CsvExport = export_csv(&create_test_rows(), CsvEncoding::Rfc4180, STAMP)
        .unwrap()
        .unwrap();

    assert_eq!(export.file_name, "checkin_report_1717171717000.csv");
}

#[test]
fn test_export_header_uses_raw_key_order() {
    let rows: Vec<ReportRow> = create_test_rows();
    for encoding in [CsvEncoding::Rfc4180, CsvEncoding::JsonCells] {
        let export: CsvExport = export_csv(&rows, encoding, STAMP).unwrap().unwrap();
        let header: &str = export.content.lines().next().unwrap();

        assert_eq!(
            header,
            "booking_id,name,type,check_in,property,destination,timestamp"
        );
    }
}

#[test]
fn test_json_cells_encoding() {
    let rows: Vec<ReportRow> = vec![
        row(json!({"booking_id": "B-1", "guests": 2, "paid": true, "notes": null})),
        row(json!({"booking_id": "B-2", "guests": 3})),
    ];

    let export: CsvExport = export_csv(&rows, CsvEncoding::JsonCells, STAMP)
        .unwrap()
        .unwrap();

    assert_eq!(
        export.content,
        "booking_id,guests,paid,notes\n\"B-1\",2,true,\"\"\n\"B-2\",3,\"\",\"\""
    );
}

#[test]
fn test_rfc4180_rows_match_header_width() {
    let rows: Vec<ReportRow> = vec![
        row(json!({"booking_id": "B-1", "special_requests": "late arrival, \"quiet\" room\ncot"})),
        row(json!({"booking_id": "B-2"})),
        row(json!({"booking_id": "B-3", "special_requests": "none", "ignored": 1})),
    ];

    let export: CsvExport = export_csv(&rows, CsvEncoding::Rfc4180, STAMP)
        .unwrap()
        .unwrap();

    let mut reader = csv::Reader::from_reader(export.content.as_bytes());
    let header_width: usize = reader.headers().unwrap().len();
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(header_width, 2);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.len() == header_width));
    assert_eq!(&records[0][1], "late arrival, \"quiet\" room\ncot");
    assert_eq!(&records[1][1], "");
}

#[test]
fn test_export_ignores_view_order() {
    let rows: Vec<ReportRow> = create_test_rows();

    let export: CsvExport = export_csv(&rows, CsvEncoding::Rfc4180, STAMP)
        .unwrap()
        .unwrap();
    let ids: Vec<String> = export
        .content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap().to_string())
        .collect();

    assert_eq!(ids, vec!["B-100", "B-101", "B-102", "B-103"]);
}
