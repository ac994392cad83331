//! Copy-on-write AVL tree with lock-free snapshot readers.
//!
//! This module provides [`AvlTree`], a self-balancing binary search tree
//! keyed by `i64` that supports exactly one writer and any number of
//! concurrent readers:
//!
//! - [`AvlTree::insert`] adds or replaces an entry
//! - [`AvlTree::drop_minimum`] removes the entry with the smallest key
//! - [`AvlTree::root`] returns a [`Snapshot`] of the current version
//! - [`traverse`] and [`depth_from`] walk a snapshot
//!
//! # Structural Sharing
//!
//! Nodes are immutable. A write rebuilds only the path from the changed
//! position to the root; every other subtree is shared with the previous
//! version. The new root is then published with a single atomic store, so
//! a reader sees either the whole old tree or the whole new one.
//!
//! # Examples
//!
//! ```rust
//! use snaptree::tree::AvlTree;
//!
//! let tree = AvlTree::new();
//! for key in [9, 7, 11, 4, 8, 1] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! let snapshot = tree.root();
//! let keys: Vec<i64> = snapshot.keys().collect();
//! assert_eq!(keys, vec![1, 4, 7, 8, 9, 11]);
//!
//! // The insert of 1 rotated 7 up to the root
//! assert_eq!(snapshot.depth_of(7), 1);
//! assert_eq!(snapshot.depth_of(1), 3);
//!
//! // Snapshots are unaffected by later writes
//! tree.drop_minimum();
//! assert_eq!(snapshot.min().map(|(key, _)| key), Some(1));
//! assert_eq!(tree.root().min().map(|(key, _)| key), Some(4));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// Always `std::sync::Arc`: snapshots are handed to reader threads and the
/// current version is published through `arc_swap`.
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

mod drop_minimum;
mod handle;
mod insert;
mod node;
mod rotation;
mod snapshot;
mod stats;

pub use handle::AvlTree;
pub use node::Key;
pub use node::Node;
pub use snapshot::Snapshot;
pub use snapshot::SnapshotIterator;
pub use snapshot::depth_from;
pub use snapshot::traverse;
pub use stats::Stats;

// =============================================================================
// Tests
// =============================================================================
