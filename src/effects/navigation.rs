//! Navigation mode selection and dispatch.
//!
//! A page change is written back to the host router in exactly one of two
//! ways: by rewriting the `page` path parameter when the active route
//! template has a `:page` placeholder, or by updating the `page` query
//! parameter otherwise.

use super::env::ListingEnv;
use crate::core::{RouteState, PAGE_KEY};
use std::collections::BTreeMap;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use thiserror::Error;

/// Placeholder that marks a page-aware route template.
pub const PAGE_PLACEHOLDER: &str = ":page";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("router rejected navigation to route '{route_id}': {reason}")]
    Rejected { route_id: String, reason: String },
}

/// Path-based navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateRequest {
    pub route_id: String,
    pub params: BTreeMap<String, String>,
    /// Whether the router should handle scrolling. Always `false` here;
    /// scroll restoration is done by the listing itself.
    pub scroll: bool,
}

/// Host router as seen by a listing.
pub trait Router: Send + Sync {
    /// Snapshot of the active route, its template and query string.
    fn route(&self) -> RouteState;

    /// Merge `query` into the current query string.
    fn set_query(&self, query: BTreeMap<String, String>) -> Result<(), NavigationError>;

    /// Navigate to a route with the given path parameters.
    fn navigate(&self, request: NavigateRequest) -> Result<(), NavigationError>;
}

/// How a page change is expressed in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    PathParam,
    QueryString,
}

impl NavigationMode {
    /// Pick the mode for a route template.
    ///
    /// The placeholder only counts past the first character, which a
    /// template always spends on its leading `/`.
    pub fn for_template(template: &str) -> Self {
        match template.find(PAGE_PLACEHOLDER) {
            Some(index) if index > 0 => Self::PathParam,
            _ => Self::QueryString,
        }
    }
}

/// The router call a navigation issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCall {
    Navigate(NavigateRequest),
    SetQuery(BTreeMap<String, String>),
}

impl NavigationCall {
    pub fn mode(&self) -> NavigationMode {
        match self {
            Self::Navigate(_) => NavigationMode::PathParam,
            Self::SetQuery(_) => NavigationMode::QueryString,
        }
    }
}

/// Write `page` back to the router with exactly one router call.
///
/// Repeated calls with the same page issue repeated navigations.
pub fn dispatch_navigation<R: Router + ?Sized>(
    router: &R,
    page: u32,
) -> Result<NavigationCall, NavigationError> {
    let route = router.route();
    let value = page.to_string();

    let call = match NavigationMode::for_template(&route.path_template) {
        NavigationMode::PathParam => {
            let mut params = route.params;
            params.insert(PAGE_KEY.to_string(), value);
            let request = NavigateRequest {
                route_id: route.route_id,
                params,
                scroll: false,
            };
            router.navigate(request.clone())?;
            NavigationCall::Navigate(request)
        }
        NavigationMode::QueryString => {
            let query = BTreeMap::from([(PAGE_KEY.to_string(), value)]);
            router.set_query(query.clone())?;
            NavigationCall::SetQuery(query)
        }
    };

    tracing::debug!(page, mode = ?call.mode(), "navigation dispatched");
    Ok(call)
}

/// Navigation as an effect over the listing environment.
pub fn navigate_to<Env: ListingEnv>(
    page: u32,
) -> impl Effect<Output = NavigationCall, Error = NavigationError, Env = Env> {
    from_fn(move |env: &Env| dispatch_navigation(env.router(), page))
}
