// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_domain::{DomainError, clamp_page};
use tracing::debug;

use crate::command::ViewCommand;
use crate::error::CoreError;
use crate::state::ViewState;

/// Applies a command to a view, producing the next view.
///
/// The input state is never modified. Filter changes and data loads reset
/// the page to 1, as does a page size change. Sorting keeps the current
/// page. Direction toggles do nothing on a view without them. After every
/// command the page is clamped into range.
///
/// # Errors
///
/// Returns an error if:
/// - A page of zero is requested
/// - A page size of zero, or one the view does not offer, is requested
pub fn apply(state: &ViewState, command: ViewCommand) -> Result<ViewState, CoreError> {
    let command_name: &'static str = command.name();
    let mut next: ViewState = match command {
        ViewCommand::Load(result) => ViewState {
            result,
            page: 1,
            ..state.clone()
        },
        ViewCommand::SetSearch(search) => ViewState {
            search,
            page: 1,
            ..state.clone()
        },
        ViewCommand::ToggleHide(_) | ViewCommand::ToggleHideBoth
            if !state.mode.has_status_toggles() =>
        {
            state.clone()
        }
        ViewCommand::ToggleHide(direction) => ViewState {
            hidden: state.hidden.toggled(direction),
            page: 1,
            ..state.clone()
        },
        ViewCommand::ToggleHideBoth => ViewState {
            hidden: state.hidden.toggled_both(),
            page: 1,
            ..state.clone()
        },
        ViewCommand::Sort(key) => ViewState {
            sort: state.sort.toggled(&key),
            ..state.clone()
        },
        ViewCommand::SetPage(page) => {
            if page == 0 {
                return Err(CoreError::DomainViolation(DomainError::InvalidPage { page }));
            }
            ViewState {
                page,
                ..state.clone()
            }
        }
        ViewCommand::NextPage => ViewState {
            page: state.window().next_page(),
            ..state.clone()
        },
        ViewCommand::PreviousPage => ViewState {
            page: state.window().previous_page(),
            ..state.clone()
        },
        ViewCommand::SetPageSize(size) => {
            validate_page_size(state, size)?;
            ViewState {
                page_size: size,
                page: 1,
                ..state.clone()
            }
        }
        ViewCommand::Clear => ViewState {
            page_size: state.page_size,
            ..ViewState::new(state.mode)
        },
    };

    next.page = clamp_page(next.page, next.total_pages());

    debug!(
        command = command_name,
        page = next.page,
        page_size = next.page_size,
        rows = next.result.len(),
        "Applied view command"
    );

    Ok(next)
}

fn validate_page_size(state: &ViewState, size: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidPageSize {
            size,
        }));
    }
    if !state.mode.page_size_options().contains(&size) {
        return Err(CoreError::PageSizeNotOffered {
            size,
            mode: state.mode,
        });
    }
    Ok(())
}
