// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::row::{ReportRow, field_text};

/// Reservation direction values carried by the status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// A check-in.
    In,
    /// A check-out.
    Out,
}

impl Direction {
    /// The lowercase value this direction carries in report rows.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two independent "hide" toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HiddenStatuses {
    /// Hide rows whose direction is `in`.
    #[serde(rename = "in")]
    pub hide_in: bool,
    /// Hide rows whose direction is `out`.
    #[serde(rename = "out")]
    pub hide_out: bool,
}

impl HiddenStatuses {
    /// Flips the toggle for one direction.
    #[must_use]
    pub const fn toggled(self, direction: Direction) -> Self {
        match direction {
            Direction::In => Self {
                hide_in: !self.hide_in,
                hide_out: self.hide_out,
            },
            Direction::Out => Self {
                hide_in: self.hide_in,
                hide_out: !self.hide_out,
            },
        }
    }

    /// The "hide both" control: sets both toggles to `!(in && out)`.
    #[must_use]
    pub const fn toggled_both(self) -> Self {
        let next: bool = !(self.hide_in && self.hide_out);
        Self {
            hide_in: next,
            hide_out: next,
        }
    }

    /// Whether both toggles are set.
    #[must_use]
    pub const fn hides_both(&self) -> bool {
        self.hide_in && self.hide_out
    }

    fn hides(&self, value: &str) -> bool {
        match value {
            "in" => self.hide_in,
            "out" => self.hide_out,
            _ => false,
        }
    }
}

/// Applies free-text search and the status toggles.
///
/// The search is a case-insensitive substring match against the JSON
/// serialization of the whole row; a blank query disables it. Status
/// toggles only apply when a status field was detected.
#[must_use]
pub fn filter_rows(
    rows: &[ReportRow],
    search: &str,
    hidden: HiddenStatuses,
    status_key: Option<&str>,
) -> Vec<ReportRow> {
    let query: Option<String> = if search.trim().is_empty() {
        None
    } else {
        Some(search.to_lowercase())
    };

    rows.iter()
        .filter(|row| {
            query
                .as_deref()
                .is_none_or(|query| matches_search(row, query))
        })
        .filter(|row| {
            status_key.is_none_or(|key| !hidden.hides(&field_text(row, key).to_lowercase()))
        })
        .cloned()
        .collect()
}

fn matches_search(row: &ReportRow, lowercase_query: &str) -> bool {
    serde_json::to_string(row)
        .map(|serialized| serialized.to_lowercase().contains(lowercase_query))
        .unwrap_or(false)
}
