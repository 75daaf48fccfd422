// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Result-set schema resolution.
//!
//! Reports carry no declared schema, so the column set, the direction
//! (status) field and the date fields used for year grouping are resolved
//! once per result set from the first row. Explicit mappings supplied by
//! the data-source integration take precedence; the name-sniffing
//! heuristics are the fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::row::{ReportRow, field_text};

/// Columns never shown in the table.
pub const DEFAULT_HIDDEN_COLUMNS: &[&str] = &["timestamp"];

/// Free-text columns always rendered last.
pub const DEFAULT_TRAILING_COLUMNS: &[&str] = &["extras", "special_requests", "special requests"];

/// Key-name fragments that mark a date column usable for year grouping.
pub const YEAR_KEY_HINTS: &[&str] = &[
    "check_in",
    "checkin",
    "start_date",
    "startdate",
    "arrival",
    "date",
];

/// Key-name fragments that mark the direction field.
pub const STATUS_KEY_HINTS: &[&str] = &["status", "type", "direction"];

const DIRECTION_KEY: &str = "type";
const BOOKING_ID_KEY: &str = "booking_id";
const NAME_KEY: &str = "name";

/// Explicit schema mapping supplied by configuration.
///
/// Every field is optional; anything left unset falls back to the
/// heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaHints {
    /// The field holding the `in`/`out` direction.
    pub status_key: Option<String>,
    /// Date fields, in priority order, used for year grouping.
    pub year_keys: Option<Vec<String>>,
    /// Columns to hide (case-insensitive).
    pub hidden_columns: Vec<String>,
    /// Columns forced to the end of the table (case-insensitive).
    pub trailing_columns: Vec<String>,
}

impl Default for SchemaHints {
    fn default() -> Self {
        Self {
            status_key: None,
            year_keys: None,
            hidden_columns: DEFAULT_HIDDEN_COLUMNS
                .iter()
                .map(|key| (*key).to_string())
                .collect(),
            trailing_columns: DEFAULT_TRAILING_COLUMNS
                .iter()
                .map(|key| (*key).to_string())
                .collect(),
        }
    }
}

/// How rows whose key set differs from the first row are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPolicy {
    /// Keep every row; missing fields render as empty cells.
    #[default]
    Lenient,
    /// Set divergent rows aside instead of displaying them.
    Quarantine,
}

/// Where a row's year is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "keys", rename_all = "snake_case")]
pub enum YearSource {
    /// Scan each row's keys for names containing one of these fragments.
    Hints(Vec<String>),
    /// Read exactly these fields, in order.
    Explicit(Vec<String>),
}

impl Default for YearSource {
    fn default() -> Self {
        Self::Hints(YEAR_KEY_HINTS.iter().map(|hint| (*hint).to_string()).collect())
    }
}

/// The resolved shape of one fetched result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSchema {
    /// Keys of the first row, in their original order.
    pub source_keys: Vec<String>,
    /// Display columns after hiding and reordering.
    pub columns: Vec<String>,
    /// Source keys minus hidden columns, in their original order.
    pub plain_columns: Vec<String>,
    /// The direction field, if one was found.
    pub status_key: Option<String>,
    /// How row years are detected.
    pub year_source: YearSource,
}

impl ReportSchema {
    /// Resolves the schema from the first row of a result set.
    #[must_use]
    pub fn infer(first_row: &ReportRow, hints: &SchemaHints) -> Self {
        let source_keys: Vec<String> = first_row.keys().cloned().collect();
        let columns: Vec<String> = derive_columns(
            &source_keys,
            &hints.hidden_columns,
            &hints.trailing_columns,
        );
        let plain_columns: Vec<String> = source_keys
            .iter()
            .filter(|key| {
                !hints
                    .hidden_columns
                    .iter()
                    .any(|hidden| hidden.eq_ignore_ascii_case(key))
            })
            .cloned()
            .collect();

        let status_key: Option<String> = match hints.status_key.as_deref() {
            Some(key) if first_row.contains_key(key) => Some(key.to_string()),
            Some(key) => {
                warn!(
                    status_key = key,
                    "Configured status key not present in report; falling back to detection"
                );
                detect_status_key(first_row)
            }
            None => detect_status_key(first_row),
        };

        let year_source: YearSource = match &hints.year_keys {
            Some(keys) => {
                let present: Vec<String> = keys
                    .iter()
                    .filter(|key| first_row.contains_key(key.as_str()))
                    .cloned()
                    .collect();
                if present.is_empty() {
                    warn!(
                        year_keys = ?keys,
                        "Configured year keys not present in report; falling back to detection"
                    );
                    YearSource::default()
                } else {
                    YearSource::Explicit(present)
                }
            }
            None => YearSource::default(),
        };

        debug!(
            columns = columns.len(),
            status_key = ?status_key,
            "Resolved report schema"
        );

        Self {
            source_keys,
            columns,
            plain_columns,
            status_key,
            year_source,
        }
    }

    /// Whether a row carries exactly the first row's key set.
    #[must_use]
    pub fn conforms(&self, row: &ReportRow) -> bool {
        row.len() == self.source_keys.len()
            && self
                .source_keys
                .iter()
                .all(|key| row.contains_key(key.as_str()))
    }
}

/// Finds the direction field in the first row.
///
/// A key matches when its name contains `status`, `type` or `direction`
/// (case-insensitive), or when its value is exactly `in` or `out`.
#[must_use]
pub fn detect_status_key(first_row: &ReportRow) -> Option<String> {
    first_row
        .keys()
        .find(|key| {
            let lower_key: String = key.to_lowercase();
            let key_match: bool = STATUS_KEY_HINTS
                .iter()
                .any(|hint| lower_key.contains(hint));
            let value: String = field_text(first_row, key).to_lowercase();
            key_match || value == "in" || value == "out"
        })
        .cloned()
}

/// Derives the ordered display columns from the first row's keys.
#[must_use]
pub fn derive_columns(
    source_keys: &[String],
    hidden_columns: &[String],
    trailing_columns: &[String],
) -> Vec<String> {
    let hidden: HashSet<String> = hidden_columns.iter().map(|c| c.to_lowercase()).collect();
    let trailing: HashSet<String> = trailing_columns.iter().map(|c| c.to_lowercase()).collect();

    let mut columns: Vec<String> = source_keys
        .iter()
        .filter(|key| !hidden.contains(&key.to_lowercase()))
        .cloned()
        .collect();

    if let Some(type_index) = position_of(&columns, DIRECTION_KEY) {
        let type_key: String = columns.remove(type_index);
        let target: usize = position_of(&columns, BOOKING_ID_KEY).map_or_else(
            || position_of(&columns, NAME_KEY).unwrap_or(columns.len()),
            |booking_index| booking_index + 1,
        );
        let target: usize = target.min(columns.len());
        columns.insert(target, type_key);
    }

    let (regular, end): (Vec<String>, Vec<String>) = columns
        .into_iter()
        .partition(|key| !trailing.contains(&key.to_lowercase()));

    regular.into_iter().chain(end).collect()
}

fn position_of(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|key| key.eq_ignore_ascii_case(name))
}

/// A fetched report together with its resolved schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Every fetched row, in fetch order.
    source: Vec<ReportRow>,
    /// Conforming rows when some were quarantined; `None` means all of `source`.
    conforming: Option<Vec<ReportRow>>,
    quarantined: Vec<ReportRow>,
    schema: Option<ReportSchema>,
}

impl ResultSet {
    /// Builds a result set, resolving the schema from the first row.
    #[must_use]
    pub fn new(rows: Vec<ReportRow>, hints: &SchemaHints, policy: SchemaPolicy) -> Self {
        let Some(first_row) = rows.first() else {
            return Self::default();
        };
        let schema: ReportSchema = ReportSchema::infer(first_row, hints);

        let mut conforming: Option<Vec<ReportRow>> = None;
        let mut quarantined: Vec<ReportRow> = Vec::new();
        if policy == SchemaPolicy::Quarantine && !rows.iter().all(|row| schema.conforms(row)) {
            let (kept, divergent): (Vec<ReportRow>, Vec<ReportRow>) =
                rows.iter().cloned().partition(|row| schema.conforms(row));
            warn!(
                quarantined = divergent.len(),
                kept = kept.len(),
                "Report rows diverge from the first row's fields"
            );
            conforming = Some(kept);
            quarantined = divergent;
        }

        Self {
            source: rows,
            conforming,
            quarantined,
            schema: Some(schema),
        }
    }

    /// The rows shown in the table, in fetch order.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        self.conforming.as_deref().unwrap_or(&self.source)
    }

    /// Every fetched row including quarantined ones, in fetch order.
    #[must_use]
    pub fn source_rows(&self) -> &[ReportRow] {
        &self.source
    }

    /// Rows set aside under [`SchemaPolicy::Quarantine`].
    #[must_use]
    pub fn quarantined(&self) -> &[ReportRow] {
        &self.quarantined
    }

    /// The resolved schema, absent for an empty result.
    #[must_use]
    pub const fn schema(&self) -> Option<&ReportSchema> {
        self.schema.as_ref()
    }

    /// Display columns, empty for an empty result.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        self.schema.as_ref().map_or(&[], |schema| &schema.columns)
    }

    /// Columns without reordering, empty for an empty result.
    #[must_use]
    pub fn plain_columns(&self) -> &[String] {
        self.schema
            .as_ref()
            .map_or(&[], |schema| &schema.plain_columns)
    }

    /// The detected direction field.
    #[must_use]
    pub fn status_key(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .and_then(|schema| schema.status_key.as_deref())
    }

    /// Number of displayable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    /// Whether the fetch returned nothing displayable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}
