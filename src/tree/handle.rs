//! The tree handle: one writer, any number of lock-free readers.

use super::ReferenceCounter;
use super::drop_minimum::drop_minimum;
use super::insert::{Insertion, insert};
use super::node::{Key, Link};
use super::snapshot::Snapshot;
use super::stats::Stats;
use crate::config::TreeConfig;
use arc_swap::ArcSwap;
use std::fmt;

/// One published version: a root and the counters that describe it.
struct Version<V> {
    root: Link<V>,
    stats: Stats,
}

/// A self-balancing AVL tree keyed by `i64`, updated by copy-on-write.
///
/// Each write builds a new version of the tree and publishes it with a
/// single atomic pointer swap. Readers load the current version with a
/// single atomic load and walk it without any locking; a version they hold
/// never changes underneath them.
///
/// # Single Writer
///
/// [`insert`](Self::insert) and [`drop_minimum`](Self::drop_minimum) take
/// `&self` so the handle can be shared, but they are not synchronized with
/// each other. Callers must run at most one write at a time. Two racing
/// writers cannot corrupt memory, but one of their updates may be lost.
///
/// # Examples
///
/// ```rust
/// use snaptree::tree::AvlTree;
/// use std::sync::Arc;
/// use std::thread;
///
/// let tree = Arc::new(AvlTree::new());
///
/// let writer = {
///     let tree = Arc::clone(&tree);
///     thread::spawn(move || {
///         for key in 0..1000 {
///             tree.insert(key, key.to_string());
///         }
///     })
/// };
///
/// // Readers never block and always see a consistent, sorted tree
/// let snapshot = tree.root();
/// let keys: Vec<i64> = snapshot.keys().collect();
/// assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
///
/// writer.join().unwrap();
/// assert_eq!(tree.len(), 1000);
/// ```
pub struct AvlTree<V> {
    current: ArcSwap<Version<V>>,
    config: TreeConfig,
}

impl<V> AvlTree<V> {
    /// Creates an empty tree with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snaptree::tree::AvlTree;
    ///
    /// let tree: AvlTree<String> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.stats().size(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::new())
    }

    /// Creates an empty tree with the given configuration.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(Version {
                root: None,
                stats: Stats::EMPTY,
            }),
            config,
        }
    }

    /// Returns the configuration the tree was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> TreeConfig {
        self.config
    }

    /// Returns the current version of the tree.
    ///
    /// This is one atomic load. The snapshot reflects every write that
    /// returned before the call and none that started after it.
    #[must_use]
    pub fn root(&self) -> Snapshot<V> {
        let version = self.current.load();
        Snapshot::new(version.root.clone(), version.stats)
    }

    /// Returns the counters of the current version.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.current.load().stats
    }

    /// Returns the number of entries in the current version.
    ///
    /// Derived from the counters like [`Snapshot::len`]: when
    /// [`TreeConfig::count_empty_drops`] is enabled, counted drops on an
    /// empty tree make it understate the reachable nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.stats().size()).unwrap_or(0)
    }

    /// Returns `true` if the current version holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.load().root.is_none()
    }

    /// Inserts `value` under `key`, replacing any previous value.
    ///
    /// Replacing a value keeps the tree shape and leaves the counters
    /// untouched. Inserting a new key increments `added` by one. Writer
    /// only.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snaptree::tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// tree.insert(1, "one");
    /// tree.insert(1, "ONE");
    ///
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.root().get(1), Some(&"ONE"));
    /// ```
    pub fn insert(&self, key: Key, value: V) {
        let current = self.current.load_full();
        let (root, insertion) = insert(current.root.as_ref(), key, ReferenceCounter::new(value));
        let stats = match insertion {
            Insertion::Added => current.stats.record_added(),
            Insertion::Replaced => current.stats,
        };
        tracing::trace!(key, ?insertion, "insert");
        self.publish(Some(root), stats);
    }

    /// Removes the entry with the smallest key. Writer only.
    ///
    /// On an empty tree this does nothing, unless the tree was configured
    /// with [`TreeConfig::count_empty_drops`], in which case the `dropped`
    /// counter still advances.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snaptree::tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// for key in [5, 3, 6, 4, 2] {
    ///     tree.insert(key, ());
    /// }
    /// tree.drop_minimum();
    ///
    /// let keys: Vec<i64> = tree.root().keys().collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6]);
    /// ```
    pub fn drop_minimum(&self) {
        let current = self.current.load_full();
        let Some(root) = current.root.as_ref() else {
            if self.config.counts_empty_drops() {
                tracing::trace!("drop_minimum on empty tree counted");
                self.publish(None, current.stats.record_dropped());
            } else {
                tracing::trace!("drop_minimum on empty tree ignored");
            }
            return;
        };

        let (root, removed) = drop_minimum(root, self.config.removal_rebalance_mode());
        tracing::trace!(key = removed, "drop_minimum");
        self.publish(root, current.stats.record_dropped());
    }

    fn publish(&self, root: Link<V>, stats: Stats) {
        self.current.store(ReferenceCounter::new(Version { root, stats }));
        tracing::debug!(
            added = stats.added(),
            dropped = stats.dropped(),
            "published tree version"
        );
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTree<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AvlTree")
            .field("config", &self.config)
            .field("snapshot", &self.root())
            .finish()
    }
}

static_assertions::assert_impl_all!(AvlTree<i64>: Send, Sync);
static_assertions::assert_impl_all!(AvlTree<String>: Send, Sync);
static_assertions::assert_not_impl_any!(AvlTree<std::rc::Rc<i64>>: Send, Sync);
