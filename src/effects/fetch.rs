//! Content fetch interface.

use crate::core::{FetchOutcome, FetchTicket, ListingFilter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Parameters for one page of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub filter: ListingFilter,
    pub page_index: u32,
    pub page_size: u32,
    pub custom_domain: Option<String>,
}

impl FetchRequest {
    /// Query variables in the content API's naming.
    ///
    /// ```rust
    /// use pagesync::core::ListingFilter;
    /// use pagesync::effects::FetchRequest;
    ///
    /// let request = FetchRequest {
    ///     filter: ListingFilter::Search { terms: "boots".to_string() },
    ///     page_index: 2,
    ///     page_size: 10,
    ///     custom_domain: None,
    /// };
    /// let vars = request.variables();
    /// assert_eq!(vars["terms"], "boots");
    /// assert_eq!(vars["wp_page"], 2);
    /// ```
    pub fn variables(&self) -> Value {
        let mut vars = Map::new();
        match &self.filter {
            ListingFilter::Category { slug } => {
                vars.insert("categorySlug".to_string(), json!(slug));
            }
            ListingFilter::Search { terms } => {
                vars.insert("terms".to_string(), json!(terms));
            }
        }
        vars.insert("wp_page".to_string(), json!(self.page_index));
        vars.insert("wp_per_page".to_string(), json!(self.page_size));
        if let Some(domain) = &self.custom_domain {
            vars.insert("customDomain".to_string(), json!(domain));
        }
        Value::Object(vars)
    }
}

/// External content source.
///
/// `Ok(None)` means the request completed without a payload (aborted or
/// dropped by the network layer); the displayed results are kept.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn query(&self, request: &FetchRequest) -> FetchOutcome;
}

/// A finished fetch, sent back to the controller that issued it.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub outcome: FetchOutcome,
}
