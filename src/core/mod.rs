//! Pure pagination core.
//!
//! Everything in this module is free of side effects:
//! - Route reading and filter extraction
//! - Page counters, commands and their guards
//! - Fetch sequencing and the merge policy
//! - The combined pagination/fetch state machine
//!
//! The router, content source and viewport are driven from
//! [`crate::effects`], which feeds outcomes back into [`Pager`].

mod content;
mod guard;
mod history;
mod merge;
mod pager;
mod pagination;
mod route;
mod scroll;
mod state;

pub use content::{FetchError, Item, ResultSet, TaxonomyRef};
pub use guard::{Guard, NextBound, PageContext};
pub use history::{PageChange, PageHistory};
pub use merge::{merge_results, FetchLedger, FetchTicket, MergePolicy};
pub use pager::{FetchOutcome, Pager, PagerPolicy, Resolution};
pub use pagination::{rows_options, PageCommand, PaginationError, PaginationState, ROWS_OPTION_COUNT};
pub use route::{
    custom_domain, initial_page, ListingFilter, PageSource, RouteError, RouteState, Surface,
    CUSTOM_DOMAIN_SLUG_KEY, PAGE_KEY,
};
pub use scroll::ScrollTrigger;
pub use state::{FetchPhase, State};
