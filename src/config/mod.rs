//! Host settings and per-listing configuration.
//!
//! Both are read from the JSON the storefront host hands over: `Settings`
//! from the app settings, `ListingConfig` from the listing component's props.
//! Keys are camelCase; missing keys take their defaults and unknown keys are
//! ignored.

mod validation;
mod violations;

pub use validation::{validate, violations, ConfigValidation};
pub use violations::ConfigViolation;

use crate::core::{MergePolicy, NextBound, PagerPolicy};
use serde::de::value::StrDeserializer;
use serde::de::{self, IntoDeserializer, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Page size used when the props do not set one.
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;

/// Read-only flags from the host application's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub display_show_rows_text: Option<bool>,
    pub title_tag: Option<String>,
    pub filter_by_categories: bool,
    pub filter_by_tags: bool,
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The "posts per page" label is hidden only when explicitly disabled.
    pub fn show_rows_text(&self) -> bool {
        self.display_show_rows_text != Some(false)
    }
}

/// Featured image size requested from the content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSize {
    Thumbnail,
    Medium,
    MediumLarge,
    Large,
    Full,
}

/// Props of one listing component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingConfig {
    /// JSON-encoded object mapping custom-domain slugs to domains.
    pub custom_domains: Option<String>,
    pub posts_per_page: u32,
    /// An empty string means unset.
    #[serde(deserialize_with = "blank_as_none")]
    pub media_size: Option<MediaSize>,
    /// Accepts a boolean or a string; an empty string means `false`.
    #[serde(deserialize_with = "blank_as_false")]
    pub subcategory_urls: bool,
    pub merge_policy: MergePolicy,
    pub next_bound: NextBound,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            custom_domains: None,
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
            media_size: None,
            subcategory_urls: false,
            merge_policy: MergePolicy::default(),
            next_bound: NextBound::default(),
        }
    }
}

impl ListingConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn policy(&self) -> PagerPolicy {
        PagerPolicy {
            merge: self.merge_policy,
            next_bound: self.next_bound,
        }
    }

    /// Parsed custom-domain mapping.
    ///
    /// A blank string means no mapping. Malformed JSON is logged and treated
    /// the same way.
    pub fn custom_domain_map(&self) -> Option<HashMap<String, String>> {
        let raw = self.custom_domains.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<HashMap<String, String>>(raw) {
            Ok(domains) => Some(domains),
            Err(err) => {
                tracing::error!(error = %err, "ignoring malformed customDomains");
                None
            }
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<MediaSize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let value: StrDeserializer<'_, D::Error> = value.into_deserializer();
            MediaSize::deserialize(value).map(Some)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Text(String),
}

fn blank_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(flag) => Ok(flag),
        FlagValue::Text(text) => match text.trim() {
            "" | "false" => Ok(false),
            "true" => Ok(true),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"a boolean or an empty string",
            )),
        },
    }
}
