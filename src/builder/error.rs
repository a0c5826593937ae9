//! Errors raised while mounting a listing.

use crate::config::ConfigViolation;
use crate::error::ListingError;
use thiserror::Error;

/// Errors that can occur when building and mounting a listing.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Environment not specified. Call .env(env) before .mount()")]
    MissingEnv,

    #[error("Surface not specified. Call .surface(surface) before .mount()")]
    MissingSurface,

    #[error("No tokio runtime. Call .mount() from within a runtime context")]
    NoRuntime,

    #[error("Invalid listing configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    #[error(transparent)]
    Listing(#[from] ListingError),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
