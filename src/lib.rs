//! Pagesync: route-synchronized pagination for content listings
//!
//! Pagesync keeps a listing's page counters, its URL and its fetched results
//! in step. It follows Stillwater's "pure core, imperative shell" philosophy:
//! paging decisions are pure functions over plain values, and the router,
//! content source and viewport are reached only through effects.
//!
//! # Core Concepts
//!
//! - **Pagination**: page, page size and the selected row option
//! - **Guards**: pure predicates deciding whether Previous/Next may run
//! - **Tickets**: every fetch is sequenced so late responses can be discarded
//! - **History**: immutable record of page changes
//!
//! # Example
//!
//! ```rust
//! use pagesync::core::{
//!     FetchPhase, PageCommand, Pager, PagerPolicy, PaginationState, Resolution, ResultSet,
//! };
//!
//! let mut pager = Pager::new(PaginationState::new(1, 10).unwrap(), PagerPolicy::default());
//! let first = pager.load();
//! let second = pager.dispatch(PageCommand::Next).unwrap();
//!
//! // The page-1 response arrives after page 2 was requested.
//! let late = pager.resolve(first, Ok(Some(ResultSet::new(Vec::new(), 30))));
//! assert_eq!(late, Resolution::Discarded);
//!
//! pager.resolve(second, Ok(Some(ResultSet::new(Vec::new(), 30))));
//! assert_eq!(pager.phase(), &FetchPhase::Loaded { page: 2 });
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
mod error;

pub use builder::{BuildError, ListingBuilder};
pub use core::{FetchPhase, PageCommand, Pager, PaginationState, State, Surface};
pub use effects::{ListingController, ListingEnv};
pub use error::{ListingError, Result};
