// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The report table view.
//!
//! A [`ViewState`] changes only through [`apply`]; the page shown to the
//! user is always [`ViewState::render`] of the current state.

mod apply;
mod command;
mod error;
mod page;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::ViewCommand;
pub use error::CoreError;
pub use page::{TableEntry, TableHeader, TablePage};
pub use state::{ReportMode, ViewState};
