// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::row::ReportRow;

/// Page sizes offered on the full report view.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 25, 50];

/// Default page size on the full report view.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fixed page size of the simple report view.
pub const SIMPLE_PAGE_SIZE: usize = 12;

/// Number of pages needed for `count` rows; never less than one.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a 1-based page into `1..=total_pages`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Returns the rows of a 1-based page.
///
/// Pages past the end are empty.
#[must_use]
pub fn paginate(rows: &[ReportRow], page: usize, page_size: usize) -> &[ReportRow] {
    let page_size: usize = page_size.max(1);
    let start: usize = page.saturating_sub(1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end: usize = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Position within a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total pages, at least one.
    pub total_pages: usize,
}

impl PageWindow {
    /// Builds a window for `count` rows, clamping `page` into range.
    ///
    /// A zero `page_size` counts as one row per page when computing the
    /// page count; callers validate sizes before they reach a view.
    #[must_use]
    pub fn new(page: usize, page_size: usize, count: usize) -> Self {
        let total_pages: usize = total_pages(count, page_size);
        Self {
            page: clamp_page(page, total_pages),
            page_size,
            total_pages,
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn can_go_back(&self) -> bool {
        self.page > 1
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn can_go_forward(&self) -> bool {
        self.page < self.total_pages
    }

    /// The previous page, never below one.
    #[must_use]
    pub const fn previous_page(&self) -> usize {
        if self.page > 1 { self.page - 1 } else { 1 }
    }

    /// The next page, never past the last.
    #[must_use]
    pub const fn next_page(&self) -> usize {
        if self.page < self.total_pages {
            self.page + 1
        } else {
            self.total_pages
        }
    }
}
