// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::{Direction, ResultSet};

/// A command represents user intent against the report table as data only.
///
/// Commands are the only way to change a [`crate::ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Replace the table contents with a freshly fetched result.
    Load(ResultSet),
    /// Set the free-text search.
    SetSearch(String),
    /// Toggle hiding rows of one direction.
    ToggleHide(Direction),
    /// Hide both directions, or show both if both are hidden.
    ToggleHideBoth,
    /// Sort by a column; repeating the current key flips the direction.
    Sort(String),
    /// Jump to a 1-based page.
    SetPage(usize),
    /// Move one page forward.
    NextPage,
    /// Move one page back.
    PreviousPage,
    /// Change the number of rows per page.
    SetPageSize(usize),
    /// Drop the loaded result and reset filters, sort and page.
    Clear,
}

impl ViewCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "Load",
            Self::SetSearch(_) => "SetSearch",
            Self::ToggleHide(_) => "ToggleHide",
            Self::ToggleHideBoth => "ToggleHideBoth",
            Self::Sort(_) => "Sort",
            Self::SetPage(_) => "SetPage",
            Self::NextPage => "NextPage",
            Self::PreviousPage => "PreviousPage",
            Self::SetPageSize(_) => "SetPageSize",
            Self::Clear => "Clear",
        }
    }
}
