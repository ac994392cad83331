//! Errors reported by snapshot validation.
//!
//! Tree operations themselves are total and never fail. The only fallible
//! call is [`Snapshot::validate`](crate::tree::Snapshot::validate), a
//! diagnostic that walks a snapshot and reports the first broken invariant.

use crate::tree::Key;
use thiserror::Error;

/// Which side of a key an ordering bound lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The key must be strictly greater than this ancestor key.
    Above(Key),
    /// The key must be strictly less than this ancestor key.
    Below(Key),
}

/// A broken structural invariant found in a snapshot.
///
/// # Examples
///
/// ```rust
/// use snaptree::error::InvariantError;
///
/// let error = InvariantError::Unbalanced { key: 7, balance_factor: -2 };
/// assert_eq!(
///     error.to_string(),
///     "node 7 is unbalanced: balance factor -2"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key sits on the wrong side of one of its ancestors.
    #[error("node {key} violates search order: expected {bound:?}")]
    Unordered {
        /// The misplaced key.
        key: Key,
        /// The ancestor bound it violates.
        bound: Bound,
    },

    /// A cached height disagrees with the heights of the children.
    #[error("node {key} caches height {cached} but its children give {computed}")]
    HeightMismatch {
        /// The node key.
        key: Key,
        /// The stored height.
        cached: usize,
        /// `1 + max(height(left), height(right))`.
        computed: usize,
    },

    /// Sibling subtree heights differ by more than one.
    #[error("node {key} is unbalanced: balance factor {balance_factor}")]
    Unbalanced {
        /// The node key.
        key: Key,
        /// `height(left) - height(right)`.
        balance_factor: isize,
    },

    /// The recorded size exceeds the number of reachable nodes.
    #[error("snapshot records size {recorded} but only {reachable} nodes are reachable")]
    SizeMismatch {
        /// Nodes reachable from the root.
        reachable: usize,
        /// `added - dropped` at publication time.
        recorded: i64,
    },
}
