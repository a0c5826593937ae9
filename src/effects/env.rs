//! Environment a listing runs its effects against.

use super::fetch::ContentSource;
use super::navigation::Router;
use super::scroll::Viewport;
use std::sync::Arc;

/// Capabilities the host provides to a listing.
///
/// Cloned into effects, so implementations usually hold `Arc`s.
pub trait ListingEnv: Clone + Send + Sync + 'static {
    fn router(&self) -> &dyn Router;

    fn source(&self) -> Arc<dyn ContentSource>;

    /// Viewport holding the list container, if one is mounted.
    fn viewport(&self) -> Option<&dyn Viewport> {
        None
    }
}
