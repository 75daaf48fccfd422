// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Report rows and the client-side table pipeline.
//!
//! The pipeline runs filter → sort → paginate → year grouping over rows
//! whose shape is only known at runtime. CSV export works on the raw
//! fetched rows.

mod dates;
mod error;
mod export;
mod filter;
mod format;
mod grouping;
mod pagination;
mod row;
mod schema;
mod sort;

#[cfg(test)]
mod tests;

pub use dates::{QUERY_DATE_FORMAT, format_query_date, parse_calendar_date};
pub use error::DomainError;
pub use export::{CSV_CONTENT_TYPE, CsvEncoding, CsvExport, csv_file_name, export_csv};
pub use filter::{Direction, HiddenStatuses, filter_rows};
pub use format::{format_cell, header_label};
pub use grouping::{DisplayEntry, group_by_year, row_year};
pub use pagination::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageWindow, SIMPLE_PAGE_SIZE, clamp_page, paginate,
    total_pages,
};
pub use row::{ReportRow, field_text, normalize_payload, value_text};
pub use schema::{
    DEFAULT_HIDDEN_COLUMNS, DEFAULT_TRAILING_COLUMNS, ReportSchema, ResultSet, STATUS_KEY_HINTS,
    SchemaHints, SchemaPolicy, YEAR_KEY_HINTS, YearSource, derive_columns, detect_status_key,
};
pub use sort::{SortConfig, SortDirection, locale_compare, sort_rows};
