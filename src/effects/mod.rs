//! Effectful listing operations using Stillwater 0.11.0.
//!
//! This module is the "imperative shell" around the pure paging core. It
//! talks to the host router, the content source and the viewport.
//!
//! # Key Concepts
//!
//! - **Environment**: [`ListingEnv`] bundles the host capabilities
//! - **Navigation**: page changes are written back to the URL as an `Effect`
//! - **Fetching**: content queries run on tokio tasks and report back over a channel
//! - **Controller**: [`ListingController`] ties a `Pager` to the environment

mod controller;
mod env;
mod fetch;
mod navigation;
mod scroll;

pub use controller::{ListingController, ListingView};
pub use env::ListingEnv;
pub use fetch::{ContentSource, FetchCompletion, FetchRequest};
pub use navigation::{
    dispatch_navigation, navigate_to, NavigateRequest, NavigationCall, NavigationError,
    NavigationMode, Router, PAGE_PLACEHOLDER,
};
pub use scroll::{restore_scroll, ScrollBehavior, Viewport, SCROLL_MARGIN};
