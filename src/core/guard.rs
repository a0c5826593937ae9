//! Guard predicates for pagination commands.
//!
//! Guards are pure boolean functions evaluated before a command is applied.
//! A blocked command is a no-op: no state change, no navigation, no fetch.

use super::pagination::PaginationState;
use serde::{Deserialize, Serialize};

/// What a guard gets to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub pagination: PaginationState,
    /// Total item count of the displayed result set, when one is known.
    pub total_count: Option<u64>,
}

/// How far `Next` may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextBound {
    /// `Next` always advances, even past the last page.
    #[default]
    Unbounded,
    /// `Next` is blocked on the last page once a total count is known.
    ClampToTotal,
}

/// Pure predicate that decides whether a command may run.
///
/// # Example
///
/// ```rust
/// use pagesync::core::{Guard, PageContext, PaginationState};
///
/// let guard = Guard::new(|ctx: &PageContext| ctx.pagination.page() < 3);
/// let ctx = PageContext {
///     pagination: PaginationState::new(2, 10).unwrap(),
///     total_count: None,
/// };
/// assert!(guard.check(&ctx));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl Guard<PageContext> {
    /// Guard for `Previous`: only above the first page.
    pub fn previous() -> Self {
        Guard::new(|ctx: &PageContext| ctx.pagination.page() > 1)
    }

    /// Guard for `Next` under the given bound.
    pub fn next(bound: NextBound) -> Self {
        match bound {
            NextBound::Unbounded => Guard::new(|_: &PageContext| true),
            NextBound::ClampToTotal => Guard::new(|ctx: &PageContext| match ctx.total_count {
                Some(total) => ctx.pagination.page() < ctx.pagination.last_page(total),
                None => true,
            }),
        }
    }
}
