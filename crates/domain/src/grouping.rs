// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Year dividers for a displayed page.

use std::collections::BTreeSet;

use crate::dates::parse_calendar_date;
use crate::row::{ReportRow, value_text};
use crate::schema::YearSource;

/// One entry of a displayed page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEntry<'a> {
    /// Full-width header announcing the year of the rows that follow.
    YearDivider(i32),
    /// A report row.
    Row(&'a ReportRow),
}

/// Detects the year a row belongs to.
///
/// With [`YearSource::Hints`] the row's keys are scanned in order and the
/// first key whose lowercase name contains a hint and whose value parses as
/// a date wins. With [`YearSource::Explicit`] the listed keys are tried in
/// order.
#[must_use]
pub fn row_year(row: &ReportRow, source: &YearSource) -> Option<i32> {
    match source {
        YearSource::Hints(hints) => row
            .iter()
            .filter(|(key, _)| {
                let lower_key: String = key.to_lowercase();
                hints.iter().any(|hint| lower_key.contains(hint.as_str()))
            })
            .find_map(|(_, value)| parse_calendar_date(&value_text(value))),
        YearSource::Explicit(keys) => keys
            .iter()
            .filter_map(|key| row.get(key.as_str()))
            .find_map(|value| parse_calendar_date(&value_text(value))),
    }
    .map(|date| date.year())
}

/// Interleaves year dividers into an already paginated slice.
///
/// Dividers are emitted only when the slice spans at least two distinct
/// detected years. A divider precedes each row whose year differs from the
/// last year emitted; rows without a detectable year never emit one.
#[must_use]
pub fn group_by_year<'a>(rows: &'a [ReportRow], source: &YearSource) -> Vec<DisplayEntry<'a>> {
    let years: Vec<Option<i32>> = rows.iter().map(|row| row_year(row, source)).collect();
    let distinct: BTreeSet<i32> = years.iter().flatten().copied().collect();

    if distinct.len() < 2 {
        return rows.iter().map(DisplayEntry::Row).collect();
    }

    let mut entries: Vec<DisplayEntry<'a>> = Vec::with_capacity(rows.len() + distinct.len());
    let mut previous: Option<i32> = None;
    for (row, year) in rows.iter().zip(years) {
        if let Some(year) = year {
            if previous != Some(year) {
                entries.push(DisplayEntry::YearDivider(year));
            }
            previous = Some(year);
        }
        entries.push(DisplayEntry::Row(row));
    }
    entries
}
