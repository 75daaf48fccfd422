// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::{
    DEFAULT_PAGE_SIZE, HiddenStatuses, PAGE_SIZE_OPTIONS, PageWindow, ReportRow, ResultSet,
    SIMPLE_PAGE_SIZE, SortConfig, filter_rows, sort_rows, total_pages,
};
use serde::{Deserialize, Serialize};

/// Which report view the table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Region is required; page size is selectable; rows are grouped by
    /// year and can be hidden by direction.
    #[default]
    Full,
    /// Region may be left blank; page size is fixed. No year dividers, no
    /// direction toggles, and columns keep their fetched order.
    Simple,
}

impl ReportMode {
    /// Page sizes this view offers.
    #[must_use]
    pub const fn page_size_options(self) -> &'static [usize] {
        match self {
            Self::Full => PAGE_SIZE_OPTIONS,
            Self::Simple => &[SIMPLE_PAGE_SIZE],
        }
    }

    /// Page size a fresh view starts with.
    #[must_use]
    pub const fn default_page_size(self) -> usize {
        match self {
            Self::Full => DEFAULT_PAGE_SIZE,
            Self::Simple => SIMPLE_PAGE_SIZE,
        }
    }

    /// Whether a report request on this view needs a region.
    #[must_use]
    pub const fn requires_region(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Whether pages carry year dividers.
    #[must_use]
    pub const fn groups_by_year(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Whether the in/out hide toggles exist on this view.
    #[must_use]
    pub const fn has_status_toggles(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Simple => "simple",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "simple" => Ok(Self::Simple),
            other => Err(format!("Unknown report mode: {other}")),
        }
    }
}

/// The state of one report table view.
///
/// Only [`crate::apply`] produces new states; everything displayed is
/// derived from these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// The loaded result set.
    pub result: ResultSet,
    /// Free-text search.
    pub search: String,
    /// Direction toggles.
    pub hidden: HiddenStatuses,
    /// Active sort.
    pub sort: SortConfig,
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// The view this table belongs to.
    pub mode: ReportMode,
}

impl ViewState {
    /// Creates an empty view.
    #[must_use]
    pub fn new(mode: ReportMode) -> Self {
        Self {
            result: ResultSet::default(),
            search: String::new(),
            hidden: HiddenStatuses::default(),
            sort: SortConfig::default(),
            page: 1,
            page_size: mode.default_page_size(),
            mode,
        }
    }

    /// Rows passing the search and direction toggles, in fetch order.
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<ReportRow> {
        let hidden: HiddenStatuses = if self.mode.has_status_toggles() {
            self.hidden
        } else {
            HiddenStatuses::default()
        };
        filter_rows(
            self.result.rows(),
            &self.search,
            hidden,
            self.result.status_key(),
        )
    }

    /// Filtered rows in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<ReportRow> {
        sort_rows(&self.filtered_rows(), &self.sort)
    }

    /// Total pages for the current filter.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_rows().len(), self.page_size)
    }

    /// Position of the current page.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.page_size, self.filtered_rows().len())
    }

    /// Display columns for this view.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        match self.mode {
            ReportMode::Full => self.result.columns(),
            ReportMode::Simple => self.result.plain_columns(),
        }
    }

    /// Whether direction toggles have any effect on this result.
    #[must_use]
    pub fn can_filter_by_status(&self) -> bool {
        self.mode.has_status_toggles() && self.result.status_key().is_some()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ReportMode::default())
    }
}
