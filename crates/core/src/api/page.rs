//! List response envelope.

use serde::Deserialize;

/// A list response, either paginated (`{"results": [...]}`) or a bare array.
///
/// Only the first page is read; following `next` is left to the backend's
/// own tooling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    /// Paginated envelope.
    Paginated {
        /// Items on this page.
        results: Vec<T>,
        /// Total item count across all pages.
        #[serde(default)]
        count: Option<u64>,
        /// URL of the next page.
        #[serde(default)]
        next: Option<String>,
    },
    /// Unpaginated array.
    Bare(Vec<T>),
}

impl<T> Page<T> {
    /// True when the backend reports more items than this page holds.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        matches!(self, Self::Paginated { next: Some(_), .. })
    }

    /// Total count if the backend reported one.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        match self {
            Self::Paginated { count, .. } => *count,
            Self::Bare(_) => None,
        }
    }

    /// The items of this page.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated { results, .. } | Self::Bare(results) => results,
        }
    }
}
