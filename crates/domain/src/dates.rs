// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient date parsing for report cells.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Calendar-date layouts accepted for the date portion of a cell.
const DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    format_description!("[year][month][day]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
];

/// Layouts with a month name, matched against the whole cell.
const NAMED_MONTH_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!(
        "[month repr:long case_sensitive:false] [day padding:none], [year]"
    ),
    format_description!(
        "[month repr:short case_sensitive:false] [day padding:none], [year]"
    ),
    format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
    format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
];

/// Year and month without a day; the first of the month is assumed.
const YEAR_MONTH_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month padding:none]-[day]");

/// Wire format for report query dates.
pub const QUERY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parses the calendar date out of a cell's text.
///
/// Accepts RFC 3339 timestamps, ISO dates with or without zero padding
/// (`2024-03-05`, `2024-3-5`, `2024/3/5`, `20240305`), US `M/D/YYYY`
/// dates, month-name dates (`March 5, 2024`, `5 Mar 2024`) and `YYYY-MM`.
/// Numeric dates may be followed by a time part separated by `T` or a
/// space.
#[must_use]
pub fn parse_calendar_date(text: &str) -> Option<Date> {
    let text: &str = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp.date());
    }

    if let Some(date) = NAMED_MONTH_FORMATS
        .iter()
        .find_map(|format| Date::parse(text, *format).ok())
    {
        return Some(date);
    }

    let date_part: &str = text
        .split(|c: char| c == 'T' || c == 't' || c == ' ')
        .next()
        .unwrap_or(text);

    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(date_part, *format).ok())
        .or_else(|| parse_year_month(date_part))
}

fn parse_year_month(text: &str) -> Option<Date> {
    if text.matches('-').count() != 1 {
        return None;
    }
    Date::parse(&format!("{text}-01"), YEAR_MONTH_FORMAT).ok()
}

/// Formats a date for the `start_date`/`end_date` query parameters.
#[must_use]
pub fn format_query_date(date: Date) -> String {
    // The format is fixed and covers every representable year.
    date.format(QUERY_DATE_FORMAT).unwrap_or_default()
}
