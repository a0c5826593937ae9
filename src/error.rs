use crate::core::{PaginationError, RouteError, Surface};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("route has no {surface} filter parameter")]
    MissingFilter { surface: Surface },

    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),
}

pub type Result<T> = std::result::Result<T, ListingError>;
