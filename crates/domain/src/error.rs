// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur inside the report table pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A page size of zero was requested.
    InvalidPageSize {
        /// The rejected page size.
        size: usize,
    },
    /// A page number of zero was requested.
    InvalidPage {
        /// The rejected page number.
        page: usize,
    },
    /// The CSV writer failed while encoding the export.
    CsvExport(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPageSize { size } => {
                write!(f, "Invalid page size: {size}. Must be greater than 0")
            }
            Self::InvalidPage { page } => {
                write!(f, "Invalid page: {page}. Pages are numbered from 1")
            }
            Self::CsvExport(msg) => write!(f, "CSV export failed: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        Self::CsvExport(err.to_string())
    }
}
