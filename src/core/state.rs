//! Inspectable phases of the listing engine.
//!
//! A phase is a plain value describing where the fetch side of a listing
//! stands. Inspection is pure, so phases can be logged, compared in tests and
//! serialized for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for phase values tracked by the engine.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into views and history
/// - `PartialEq`: tests and the pager compare phases directly
/// - `Debug`: phases show up in log fields
/// - `Serialize` + `Deserialize`: phases can be dumped for diagnostics
///
/// # Example
///
/// ```rust
/// use pagesync::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Upload {
///     Pending,
///     Sending,
///     Rejected,
/// }
///
/// impl State for Upload {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Sending => "Sending",
///             Self::Rejected => "Rejected",
///         }
///     }
///
///     fn is_settled(&self) -> bool {
///         !matches!(self, Self::Sending)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Rejected)
///     }
/// }
///
/// assert!(Upload::Rejected.is_error());
/// assert!(!Upload::Sending.is_settled());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Short name used in log fields.
    fn name(&self) -> &str;

    /// True when no work is outstanding for this phase.
    ///
    /// Default implementation returns `true`.
    fn is_settled(&self) -> bool {
        true
    }

    /// True when the phase records a failure.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Fetch side of a listing, tracked next to the pagination counters so both
/// can be asserted together.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FetchPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch for `page` is in flight under sequence number `seq`.
    Loading { page: u32, seq: u64 },
    /// The displayed result set belongs to `page`.
    Loaded { page: u32 },
    /// The latest accepted fetch for `page` failed.
    Failed { page: u32, reason: String },
}

impl FetchPhase {
    /// Page this phase refers to, if any.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Loading { page, .. } | Self::Loaded { page } | Self::Failed { page, .. } => {
                Some(*page)
            }
        }
    }
}

impl State for FetchPhase {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Loading { .. } => "Loading",
            Self::Loaded { .. } => "Loaded",
            Self::Failed { .. } => "Failed",
        }
    }

    fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading { .. })
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
