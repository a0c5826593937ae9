//! Builder API for mounting listings.
//!
//! A listing needs a host environment and a surface; configuration and
//! settings fall back to their defaults. Configuration is validated before
//! anything is read from the route.

pub mod error;
pub mod listing;

pub use error::BuildError;
pub use listing::ListingBuilder;
