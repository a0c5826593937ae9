//! Page change history.
//!
//! Every accepted command is recorded as an immutable [`PageChange`]. The
//! history is append-only and `record` returns a new value, so snapshots
//! handed out earlier never change underneath their holders.

use super::pagination::{PageCommand, PaginationState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted command.
///
/// # Example
///
/// ```rust
/// use pagesync::core::{PageChange, PageCommand, PaginationState};
/// use chrono::Utc;
///
/// let from = PaginationState::new(1, 10).unwrap();
/// let change = PageChange {
///     from,
///     to: from.apply(PageCommand::Next),
///     command: PageCommand::Next,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.to.page(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageChange {
    pub from: PaginationState,
    pub to: PaginationState,
    pub command: PageCommand,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of page changes for one listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageHistory {
    changes: Vec<PageChange>,
}

impl PageHistory {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    ///
    /// ```rust
    /// use pagesync::core::{PageChange, PageCommand, PageHistory, PaginationState};
    /// use chrono::Utc;
    ///
    /// let from = PaginationState::new(1, 10).unwrap();
    /// let history = PageHistory::new();
    /// let next = history.record(PageChange {
    ///     from,
    ///     to: from.apply(PageCommand::Next),
    ///     command: PageCommand::Next,
    ///     timestamp: Utc::now(),
    /// });
    /// assert_eq!(next.changes().len(), 1);
    /// assert_eq!(history.changes().len(), 0);
    /// ```
    pub fn record(&self, change: PageChange) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Pages visited in order: the starting page, then the target page of
    /// every recorded change.
    pub fn get_path(&self) -> Vec<u32> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.first() {
            path.push(first.from.page());
        }
        path.extend(self.changes.iter().map(|change| change.to.page()));
        path
    }

    /// Time between the first and last recorded change.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.first()?, self.changes.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn changes(&self) -> &[PageChange] {
        &self.changes
    }

    pub fn last(&self) -> Option<&PageChange> {
        self.changes.last()
    }
}
