//! Configuration violations.

use thiserror::Error;

/// Problems found while validating a listing configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("postsPerPage must be greater than zero")]
    ZeroPostsPerPage,

    #[error("page size options for postsPerPage {posts_per_page} overflow")]
    RowsOptionsOverflow { posts_per_page: u32 },

    #[error("custom domain for slug {slug:?} is empty")]
    EmptyCustomDomain { slug: String },
}
