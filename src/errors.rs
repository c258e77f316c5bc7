//! Error types for tree operations.

use thiserror::Error;

/// The tree has no root because it has no elements.
///
/// Lookups that may legitimately find nothing (`contains`, `minimum`, `remove`) report that through
/// their return values instead; only access to the root node itself fails with this error.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("the tree is empty")]
pub struct EmptyTreeError;
