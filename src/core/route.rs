//! Reads listing parameters out of the host router's route snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Route parameter and query key carrying the page number.
pub const PAGE_KEY: &str = "page";

/// Route parameter selecting a custom-domain mapping.
pub const CUSTOM_DOMAIN_SLUG_KEY: &str = "customdomainslug";

/// Where a page value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    Path,
    Query,
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path parameter"),
            Self::Query => f.write_str("query string"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid page {value:?} in {origin}")]
    InvalidPage { origin: PageSource, value: String },
}

/// Read-only snapshot of the host router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    pub route_id: String,
    pub path_template: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
}

impl RouteState {
    pub fn new(route_id: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            path_template: path_template.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn query_page(&self) -> Option<&str> {
        self.query.get(PAGE_KEY).map(String::as_str)
    }
}

/// Page to start on: the path parameter wins over the query string, and
/// page 1 is used when neither is present.
///
/// A value that is not a positive integer is an error rather than a silent
/// fallback to page 1.
///
/// ```rust
/// use pagesync::core::{initial_page, RouteState};
///
/// let route = RouteState::new("store.search", "/search").with_query("page", "3");
/// assert_eq!(initial_page(&route), Ok(3));
/// ```
pub fn initial_page(route: &RouteState) -> Result<u32, RouteError> {
    let (origin, raw) = match (route.param(PAGE_KEY), route.query_page()) {
        (Some(value), _) => (PageSource::Path, value),
        (None, Some(value)) => (PageSource::Query, value),
        (None, None) => return Ok(1),
    };

    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(RouteError::InvalidPage {
            origin,
            value: raw.to_string(),
        }),
    }
}

/// The two listing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Category,
    Search,
}

impl Surface {
    /// Route parameters holding this surface's filter, in precedence order.
    pub fn filter_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Category => &["subcategoryslug_id", "categoryslug", "categoryslug_id"],
            Self::Search => &["term", "term_id"],
        }
    }

    /// First non-empty filter parameter for this surface.
    pub fn filter_from(&self, route: &RouteState) -> Option<ListingFilter> {
        let value = self
            .filter_keys()
            .iter()
            .filter_map(|key| route.param(key))
            .find(|value| !value.is_empty())?
            .to_string();

        Some(match self {
            Self::Category => ListingFilter::Category { slug: value },
            Self::Search => ListingFilter::Search { terms: value },
        })
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::Search => f.write_str("search"),
        }
    }
}

/// What a listing is filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingFilter {
    Category { slug: String },
    Search { terms: String },
}

/// Custom domain for the route's `customdomainslug`, if both the slug and a
/// mapping for it exist.
pub fn custom_domain(
    route: &RouteState,
    domains: Option<&HashMap<String, String>>,
) -> Option<String> {
    let slug = route.param(CUSTOM_DOMAIN_SLUG_KEY)?;
    domains?.get(slug).cloned()
}
