//! # snaptree
//!
//! A self-balancing AVL tree keyed by `i64` that one writer updates by
//! copy-on-write while any number of readers walk it without locks.
//!
//! ## Overview
//!
//! - **Tree handle**: [`AvlTree`](tree::AvlTree) owns the current root and
//!   the insertion/removal counters, published together by one atomic swap
//! - **Writes**: `insert` (add or replace) and `drop_minimum` (remove the
//!   smallest key), both rebalancing by AVL rotations
//! - **Reads**: [`Snapshot`](tree::Snapshot), plus the free functions
//!   [`traverse`](tree::traverse) and [`depth_from`](tree::depth_from)
//! - **Configuration**: [`TreeConfig`](config::TreeConfig)
//! - **Diagnostics**: [`Snapshot::validate`](tree::Snapshot::validate)
//!   reports an [`InvariantError`](error::InvariantError)
//!
//! ## Logging
//!
//! Writes emit `tracing` events: one `debug` event per published version
//! and `trace` events for rotations. Install a subscriber to see them.
//!
//! ## Example
//!
//! ```rust
//! use snaptree::prelude::*;
//!
//! let tree = AvlTree::new();
//! for key in [5, 3, 6, 4, 2] {
//!     tree.insert(key, key * 100);
//! }
//! tree.drop_minimum();
//!
//! let stats = tree.stats();
//! assert_eq!((stats.added(), stats.dropped(), stats.size()), (5, 1, 4));
//!
//! let snapshot = tree.root();
//! let mut keys = Vec::new();
//! traverse(snapshot.node(), |key, _| {
//!     keys.push(key);
//!     true
//! });
//! assert_eq!(keys, vec![3, 4, 5, 6]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use snaptree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{RemovalRebalance, TreeConfig};
    pub use crate::error::InvariantError;
    pub use crate::tree::{AvlTree, Key, Snapshot, Stats, depth_from, traverse};
}

pub mod config;
pub mod error;
pub mod tree;
