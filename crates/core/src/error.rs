// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::DomainError;

use crate::state::ReportMode;

/// Errors that can occur during view transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The page size is not one the current view offers.
    PageSizeNotOffered {
        /// The rejected page size.
        size: usize,
        /// The view the size was requested on.
        mode: ReportMode,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PageSizeNotOffered { size, mode } => {
                let offered: Vec<String> = mode
                    .page_size_options()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                write!(
                    f,
                    "Page size {size} is not offered on the {mode} report; choose one of {}",
                    offered.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
