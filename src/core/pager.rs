//! The pagination state machine.
//!
//! [`Pager`] owns the page counters, the fetch phase and the displayed
//! result set of one listing. Commands update the counters synchronously and
//! hand back a [`FetchTicket`] for the shell to fetch; the shell reports the
//! outcome through [`Pager::resolve`]. Nothing here performs I/O.

use super::content::{FetchError, ResultSet};
use super::guard::{Guard, NextBound, PageContext};
use super::history::{PageChange, PageHistory};
use super::merge::{merge_results, FetchLedger, FetchTicket, MergePolicy};
use super::pagination::{PageCommand, PaginationState};
use super::state::{FetchPhase, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What a fetch reported: a page of results, nothing at all, or an error.
pub type FetchOutcome = Result<Option<ResultSet>, FetchError>;

/// Policies a pager runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagerPolicy {
    pub merge: MergePolicy,
    pub next_bound: NextBound,
}

/// How a resolved fetch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response replaced the displayed result set.
    Applied,
    /// The response was absent; the previous result set stays displayed.
    Retained,
    /// The fetch failed; the error is now displayed.
    Failed,
    /// A newer fetch was issued since; the response was dropped.
    Discarded,
}

pub struct Pager {
    pagination: PaginationState,
    phase: FetchPhase,
    results: Option<ResultSet>,
    displayed: Option<FetchTicket>,
    error: Option<FetchError>,
    ledger: FetchLedger,
    history: PageHistory,
    policy: PagerPolicy,
    previous_guard: Guard<PageContext>,
    next_guard: Guard<PageContext>,
}

impl Pager {
    pub fn new(initial: PaginationState, policy: PagerPolicy) -> Self {
        Self {
            pagination: initial,
            phase: FetchPhase::Idle,
            results: None,
            displayed: None,
            error: None,
            ledger: FetchLedger::new(),
            history: PageHistory::new(),
            policy,
            previous_guard: Guard::previous(),
            next_guard: Guard::next(policy.next_bound),
        }
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn history(&self) -> &PageHistory {
        &self.history
    }

    pub fn policy(&self) -> PagerPolicy {
        self.policy
    }

    /// Ticket of the fetch whose results are on display.
    pub fn displayed(&self) -> Option<FetchTicket> {
        self.displayed
    }

    /// Total count of the displayed result set, 0 while nothing is shown.
    pub fn total_count(&self) -> u64 {
        self.results.as_ref().map_or(0, |r| r.total_count)
    }

    /// True when the displayed results belong to a different page or page
    /// size than the counters show.
    pub fn is_stale(&self) -> bool {
        self.displayed.is_some_and(|ticket| {
            ticket.page != self.pagination.page() || ticket.page_size != self.pagination.page_size()
        })
    }

    /// Issue the fetch for the current counters, as done on mount.
    pub fn load(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Apply a command. Returns the ticket to fetch, or `None` when a guard
    /// blocked the command and nothing changed.
    pub fn dispatch(&mut self, command: PageCommand) -> Option<FetchTicket> {
        let context = PageContext {
            pagination: self.pagination,
            total_count: self.results.as_ref().map(|r| r.total_count),
        };
        let allowed = match command {
            PageCommand::Previous => self.previous_guard.check(&context),
            PageCommand::Next => self.next_guard.check(&context),
            PageCommand::SetPageSize(_) => true,
        };
        if !allowed {
            tracing::debug!(
                command = command.name(),
                page = self.pagination.page(),
                "command blocked by guard"
            );
            return None;
        }

        let from = self.pagination;
        let to = from.apply(command);
        self.pagination = to;
        self.history = self.history.record(PageChange {
            from,
            to,
            command,
            timestamp: Utc::now(),
        });

        Some(self.issue())
    }

    /// Fold a resolved fetch into the machine.
    ///
    /// Never touches the page counters: a failed or empty fetch leaves the
    /// page where the last command put it.
    pub fn resolve(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Resolution {
        if !self.policy.merge.accepts(&self.ledger, &ticket) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.ledger.last_issued(),
                "discarding superseded fetch"
            );
            return Resolution::Discarded;
        }

        let resolution = match outcome {
            Ok(Some(fetched)) => {
                self.results = merge_results(self.results.take(), Some(fetched));
                self.displayed = Some(ticket);
                self.error = None;
                self.phase = FetchPhase::Loaded { page: ticket.page };
                Resolution::Applied
            }
            Ok(None) => {
                self.results = merge_results(self.results.take(), None);
                self.phase = match self.displayed {
                    Some(shown) => FetchPhase::Loaded { page: shown.page },
                    None => FetchPhase::Idle,
                };
                Resolution::Retained
            }
            Err(error) => {
                self.phase = FetchPhase::Failed {
                    page: ticket.page,
                    reason: error.to_string(),
                };
                self.error = Some(error);
                Resolution::Failed
            }
        };

        tracing::debug!(
            seq = ticket.seq,
            page = ticket.page,
            phase = self.phase.name(),
            ?resolution,
            "fetch resolved"
        );
        resolution
    }

    fn issue(&mut self) -> FetchTicket {
        let ticket = self
            .ledger
            .issue(self.pagination.page(), self.pagination.page_size());
        self.phase = FetchPhase::Loading {
            page: ticket.page,
            seq: ticket.seq,
        };
        ticket
    }
}
