// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rendered table page.

use checkin_report_domain::{
    DisplayEntry, HiddenStatuses, PageWindow, ReportRow, SortDirection, YearSource, format_cell,
    group_by_year, header_label, paginate,
};
use serde::Serialize;

use crate::state::{ReportMode, ViewState};

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHeader {
    /// Field name in the report rows.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Sort direction when this column is the sort key.
    pub sort: Option<SortDirection>,
}

impl TableHeader {
    /// `▲`/`▼` when sorted, empty otherwise.
    #[must_use]
    pub fn indicator(&self) -> &'static str {
        self.sort.map_or("", SortDirection::indicator)
    }
}

/// One entry of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableEntry {
    /// Full-width year header.
    YearDivider {
        /// The year of the rows that follow.
        year: i32,
    },
    /// Formatted cells, one per header.
    Row {
        /// Cell text in header order.
        cells: Vec<String>,
    },
}

/// Everything needed to display one page of the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    pub mode: ReportMode,
    pub headers: Vec<TableHeader>,
    pub body: Vec<TableEntry>,
    /// Rows on this page.
    pub showing: usize,
    /// Rows passing the filter.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub page_size_options: Vec<usize>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub search: String,
    pub hidden: HiddenStatuses,
    pub hide_both: bool,
    pub can_filter_by_status: bool,
    /// Rows set aside because their fields differ from the first row.
    pub quarantined: usize,
}

impl TablePage {
    /// The "Showing X of Y results" line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Showing {} of {} results", self.showing, self.total)
    }
}

impl ViewState {
    /// Runs the pipeline and renders the current page.
    #[must_use]
    pub fn render(&self) -> TablePage {
        let visible: Vec<ReportRow> = self.visible_rows();
        let window: PageWindow = self.window();
        let page_rows: &[ReportRow] = paginate(&visible, window.page, window.page_size);

        let columns: &[String] = self.columns();
        let headers: Vec<TableHeader> = columns
            .iter()
            .map(|key| TableHeader {
                key: key.clone(),
                label: header_label(key),
                sort: self.sort.direction_for(key),
            })
            .collect();

        let default_source: YearSource = YearSource::default();
        let year_source: &YearSource = self
            .result
            .schema()
            .map_or(&default_source, |schema| &schema.year_source);

        let entries: Vec<DisplayEntry<'_>> = if self.mode.groups_by_year() {
            group_by_year(page_rows, year_source)
        } else {
            page_rows.iter().map(DisplayEntry::Row).collect()
        };

        let body: Vec<TableEntry> = entries
            .into_iter()
            .map(|entry| match entry {
                DisplayEntry::YearDivider(year) => TableEntry::YearDivider { year },
                DisplayEntry::Row(row) => TableEntry::Row {
                    cells: columns
                        .iter()
                        .map(|column| format_cell(column, row.get(column.as_str())))
                        .collect(),
                },
            })
            .collect();

        TablePage {
            mode: self.mode,
            headers,
            body,
            showing: page_rows.len(),
            total: visible.len(),
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
            page_size_options: self.mode.page_size_options().to_vec(),
            can_go_back: window.can_go_back(),
            can_go_forward: window.can_go_forward(),
            search: self.search.clone(),
            hidden: self.hidden,
            hide_both: self.hidden.hides_both(),
            can_filter_by_status: self.can_filter_by_status(),
            quarantined: self.result.quarantined().len(),
        }
    }
}
