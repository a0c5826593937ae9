//! Fetch merge policy.
//!
//! A resolved fetch either replaces the displayed result set wholesale or,
//! when the response is absent, leaves it untouched. Which responses are
//! allowed to merge at all is decided by [`MergePolicy`] using the sequence
//! numbers handed out by [`FetchLedger`].

use super::content::ResultSet;
use serde::{Deserialize, Serialize};

/// Merge a resolved response into the displayed result set.
///
/// An absent response keeps `previous`; anything else replaces it.
///
/// ```rust
/// use pagesync::core::{merge_results, ResultSet};
///
/// let shown = Some(ResultSet::new(vec![], 12));
/// assert_eq!(merge_results(shown.clone(), None), shown);
/// ```
pub fn merge_results(previous: Option<ResultSet>, fetched: Option<ResultSet>) -> Option<ResultSet> {
    match fetched {
        Some(next) => Some(next),
        None => previous,
    }
}

/// Which resolved fetches may merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Only the most recently issued fetch may merge; older ones are dropped.
    #[default]
    LatestOnly,
    /// Whatever resolves last wins, even if it was issued first.
    LastWriteWins,
}

impl MergePolicy {
    pub fn accepts(&self, ledger: &FetchLedger, ticket: &FetchTicket) -> bool {
        match self {
            Self::LatestOnly => ledger.is_latest(ticket),
            Self::LastWriteWins => true,
        }
    }
}

/// Identity of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Hands out monotonically increasing sequence numbers.
#[derive(Debug, Clone, Default)]
pub struct FetchLedger {
    last_issued: u64,
}

impl FetchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, page: u32, page_size: u32) -> FetchTicket {
        self.last_issued += 1;
        FetchTicket {
            seq: self.last_issued,
            page,
            page_size,
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.last_issued
    }

    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(total: u64) -> ResultSet {
        ResultSet::new(Vec::new(), total)
    }

    #[test]
    fn absent_response_keeps_previous() {
        assert_eq!(merge_results(Some(results(5)), None), Some(results(5)));
        assert_eq!(merge_results(None, None), None);
    }

    #[test]
    fn present_response_replaces_previous() {
        assert_eq!(
            merge_results(Some(results(5)), Some(results(9))),
            Some(results(9))
        );
        assert_eq!(merge_results(None, Some(results(1))), Some(results(1)));
    }

    #[test]
    fn ledger_sequence_increases() {
        let mut ledger = FetchLedger::new();
        let first = ledger.issue(1, 10);
        let second = ledger.issue(2, 10);
        assert!(second.seq > first.seq);
        assert_eq!(ledger.last_issued(), second.seq);
        assert!(!ledger.is_latest(&first));
        assert!(ledger.is_latest(&second));
    }

    #[test]
    fn latest_only_rejects_superseded_tickets() {
        let mut ledger = FetchLedger::new();
        let first = ledger.issue(2, 10);
        let second = ledger.issue(1, 20);

        assert!(!MergePolicy::LatestOnly.accepts(&ledger, &first));
        assert!(MergePolicy::LatestOnly.accepts(&ledger, &second));
    }

    #[test]
    fn last_write_wins_accepts_everything() {
        let mut ledger = FetchLedger::new();
        let first = ledger.issue(2, 10);
        ledger.issue(3, 10);
        assert!(MergePolicy::LastWriteWins.accepts(&ledger, &first));
    }
}
