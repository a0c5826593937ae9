//! Page counters and the three commands that move them.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

/// Number of entries offered by the page-size selector.
pub const ROWS_OPTION_COUNT: usize = 4;

/// Errors raised when constructing pagination counters directly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1")]
    ZeroPage,

    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A user request to move the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "size", rename_all = "snake_case")]
pub enum PageCommand {
    /// Pick a new page size; always returns to page 1.
    SetPageSize(NonZeroU32),
    /// Step back one page.
    Previous,
    /// Step forward one page.
    Next,
}

impl PageCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPageSize(_) => "set_page_size",
            Self::Previous => "previous",
            Self::Next => "next",
        }
    }
}

/// Current page, page size and the size shown as selected.
///
/// Fields are private so the selector can never drift from the active page
/// size and the page can never drop below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page: u32,
    page_size: u32,
    selected_option: u32,
}

impl PaginationState {
    pub fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self {
            page,
            page_size,
            selected_option: page_size,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn selected_option(&self) -> u32 {
        self.selected_option
    }

    /// Apply a command without consulting any guard.
    ///
    /// `Previous` saturates at page 1 and `Next` saturates at `u32::MAX`;
    /// deciding whether a command is allowed at all is the pager's job.
    pub fn apply(self, command: PageCommand) -> Self {
        match command {
            PageCommand::SetPageSize(size) => Self {
                page: 1,
                page_size: size.get(),
                selected_option: size.get(),
            },
            PageCommand::Previous => Self {
                page: self.page.saturating_sub(1).max(1),
                ..self
            },
            PageCommand::Next => Self {
                page: self.page.saturating_add(1),
                ..self
            },
        }
    }

    /// One-based index of the first item on the current page.
    pub fn item_from(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size) + 1
    }

    /// One-based index of the last item the current page can hold.
    ///
    /// Not clamped to the total count, matching what the selector displays.
    pub fn item_to(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    /// Last page that holds items for `total_count`, never less than 1.
    pub fn last_page(&self, total_count: u64) -> u32 {
        let size = u64::from(self.page_size);
        let pages = total_count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Page sizes offered by the selector: one to four times the base size.
///
/// Returns `None` when a multiple does not fit in `u32`.
pub fn rows_options(base: u32) -> Option<[u32; ROWS_OPTION_COUNT]> {
    Some([
        base,
        base.checked_mul(2)?,
        base.checked_mul(3)?,
        base.checked_mul(4)?,
    ])
}
