// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::row::{ReportRow, field_text};

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// The active column sort.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// The sorted column, or `None` for fetch order.
    pub key: Option<String>,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Sort by `key` ascending.
    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    /// The config after the user selects `key`.
    ///
    /// Selecting the active key flips the direction; selecting another key
    /// starts ascending.
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        if self.key.as_deref() == Some(key) {
            Self {
                key: self.key.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::ascending(key)
        }
    }

    /// Direction of `key` if it is the sorted column.
    #[must_use]
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Locale-style string comparison.
///
/// Orders case-insensitively first; strings equal under that ordering put
/// lowercase before uppercase.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Returns a sorted copy of `rows`.
///
/// The sort is stable: rows with equal values keep their input order in
/// both directions. Without a key the input order is returned unchanged.
#[must_use]
pub fn sort_rows(rows: &[ReportRow], config: &SortConfig) -> Vec<ReportRow> {
    let Some(key) = config.key.as_deref() else {
        return rows.to_vec();
    };

    let mut keyed: Vec<(String, &ReportRow)> =
        rows.iter().map(|row| (field_text(row, key), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| match config.direction {
        SortDirection::Asc => locale_compare(a, b),
        SortDirection::Desc => locale_compare(b, a),
    });
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}
