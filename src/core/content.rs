//! Content records as the external source hands them over.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category or tag attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A single post. Owned by the content source; the engine only passes it
/// through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub featured_media: Option<u64>,
    #[serde(default)]
    pub categories: Vec<TaxonomyRef>,
    #[serde(default)]
    pub tags: Vec<TaxonomyRef>,
}

/// One page of items plus the total number of items across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<Item>,
    pub total_count: u64,
}

impl ResultSet {
    pub fn new(items: Vec<Item>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Failures reported by a content fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("content source request failed: {0}")]
    Source(String),

    #[error("fetch task ended before reporting a result")]
    Dropped,
}
