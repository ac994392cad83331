//! Read-only views of a published tree.
//!
//! A [`Snapshot`] pins one root together with the counters published with
//! it. Because nodes are immutable, a snapshot keeps describing the same
//! tree for as long as it is held, regardless of what the writer publishes
//! afterwards.

use super::ReferenceCounter;
use super::node::{Key, Link, Node, compute_height};
use super::stats::Stats;
use crate::error::{Bound, InvariantError};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

// =============================================================================
// Free Functions
// =============================================================================

/// Walks the subtree rooted at `node` in key order.
///
/// `visit` receives every key and value in ascending key order. The walk
/// stops as soon as `visit` returns `false`, and `traverse` then returns
/// `false` as well. It returns `true` when every node was visited.
///
/// # Examples
///
/// ```rust
/// use snaptree::tree::{AvlTree, traverse};
///
/// let tree = AvlTree::new();
/// for key in [3, 1, 2] {
///     tree.insert(key, key * 10);
/// }
///
/// let snapshot = tree.root();
/// let mut seen = Vec::new();
/// let completed = traverse(snapshot.node(), |key, value| {
///     seen.push((key, *value));
///     key < 2
/// });
///
/// assert!(!completed);
/// assert_eq!(seen, vec![(1, 10), (2, 20)]);
/// ```
pub fn traverse<V, F>(node: Option<&Node<V>>, mut visit: F) -> bool
where
    F: FnMut(Key, &V) -> bool,
{
    traverse_node(node, &mut visit)
}

fn traverse_node<V, F>(node: Option<&Node<V>>, visit: &mut F) -> bool
where
    F: FnMut(Key, &V) -> bool,
{
    let Some(node) = node else {
        return true;
    };

    traverse_node(node.left(), visit)
        && visit(node.key, node.value())
        && traverse_node(node.right(), visit)
}

/// Returns the 1-based depth at which `key` is found by binary search from
/// `node`, or 0 when the key is absent.
///
/// # Examples
///
/// ```rust
/// use snaptree::tree::{AvlTree, depth_from};
///
/// let tree = AvlTree::new();
/// for key in [2, 1, 3] {
///     tree.insert(key, ());
/// }
///
/// let snapshot = tree.root();
/// assert_eq!(depth_from(2, snapshot.node()), 1);
/// assert_eq!(depth_from(3, snapshot.node()), 2);
/// assert_eq!(depth_from(4, snapshot.node()), 0);
/// ```
#[must_use]
pub fn depth_from<V>(key: Key, node: Option<&Node<V>>) -> usize {
    let mut depth = 0;
    let mut current = node;
    while let Some(node) = current {
        depth += 1;
        current = match key.cmp(&node.key) {
            Ordering::Less => node.left(),
            Ordering::Greater => node.right(),
            Ordering::Equal => return depth,
        };
    }
    0
}

// =============================================================================
// Snapshot Definition
// =============================================================================

/// An immutable view of the tree as of one publication.
///
/// Cloning a snapshot is O(1); the clone shares every node.
///
/// # Examples
///
/// ```rust
/// use snaptree::tree::AvlTree;
///
/// let tree = AvlTree::new();
/// tree.insert(1, "one");
///
/// let before = tree.root();
/// tree.insert(2, "two");
///
/// // The older snapshot does not see the later insert
/// assert_eq!(before.len(), 1);
/// assert_eq!(before.get(2), None);
/// assert_eq!(tree.root().get(2), Some(&"two"));
/// ```
pub struct Snapshot<V> {
    root: Link<V>,
    stats: Stats,
}

impl<V> Snapshot<V> {
    pub(crate) const fn new(root: Link<V>, stats: Stats) -> Self {
        Self { root, stats }
    }

    /// Returns the root node, or `None` for an empty tree.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<&Node<V>> {
        self.root.as_deref()
    }

    /// Returns the counters published with this root.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Returns the number of entries recorded for this snapshot.
    ///
    /// This is `stats().size()` clamped at zero. With
    /// [`TreeConfig::count_empty_drops`](crate::config::TreeConfig::count_empty_drops)
    /// enabled, drops on an empty tree are counted too, so the result can
    /// fall below the number of reachable nodes. Use [`Self::iter`] to count
    /// nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.stats.size()).unwrap_or(0)
    }

    /// Returns `true` if the snapshot holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, 0 when empty.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.node().map_or(0, Node::height)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&V> {
        let mut current = self.node();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node.value()),
            };
        }
        None
    }

    /// Returns `true` if `key` is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Returns the entry with the smallest key, the next one
    /// [`AvlTree::drop_minimum`](super::AvlTree::drop_minimum) would remove.
    #[must_use]
    pub fn min(&self) -> Option<(Key, &V)> {
        let mut node = self.node()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some((node.key, node.value()))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(Key, &V)> {
        let mut node = self.node()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some((node.key, node.value()))
    }

    /// Walks the snapshot in key order. See [`traverse`].
    #[inline]
    pub fn traverse<F>(&self, visit: F) -> bool
    where
        F: FnMut(Key, &V) -> bool,
    {
        traverse(self.node(), visit)
    }

    /// Returns the depth of `key`. See [`depth_from`].
    #[inline]
    #[must_use]
    pub fn depth_of(&self, key: Key) -> usize {
        depth_from(key, self.node())
    }

    /// Returns an iterator over entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> SnapshotIterator<'_, V> {
        let mut iterator = SnapshotIterator { stack: Vec::with_capacity(self.height()) };
        iterator.descend_left(self.node());
        iterator
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Checks every structural invariant of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found: a key out of search
    /// order, a stale cached height, an AVL imbalance, or a recorded size
    /// larger than the number of reachable nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snaptree::tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// for key in 0..100 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.root().validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError> {
        let reachable = validate_node(self.node(), None, None)?;
        let recorded = self.stats.size();
        if usize::try_from(recorded).is_ok_and(|recorded| recorded > reachable) {
            return Err(InvariantError::SizeMismatch {
                reachable,
                recorded,
            });
        }
        Ok(())
    }
}

/// Returns the number of nodes in the subtree.
fn validate_node<V>(
    node: Option<&Node<V>>,
    lower: Option<Key>,
    upper: Option<Key>,
) -> Result<usize, InvariantError> {
    let Some(node) = node else {
        return Ok(0);
    };

    if let Some(lower) = lower.filter(|&lower| node.key <= lower) {
        return Err(InvariantError::Unordered {
            key: node.key,
            bound: Bound::Above(lower),
        });
    }
    if let Some(upper) = upper.filter(|&upper| node.key >= upper) {
        return Err(InvariantError::Unordered {
            key: node.key,
            bound: Bound::Below(upper),
        });
    }

    let left = validate_node(node.left(), lower, Some(node.key))?;
    let right = validate_node(node.right(), Some(node.key), upper)?;

    let computed = compute_height(node.left.as_ref(), node.right.as_ref());
    if node.height != computed {
        return Err(InvariantError::HeightMismatch {
            key: node.key,
            cached: node.height,
            computed,
        });
    }

    let balance_factor = node.balance_factor();
    if balance_factor.abs() > 1 {
        return Err(InvariantError::Unbalanced {
            key: node.key,
            balance_factor,
        });
    }

    Ok(left + right + 1)
}

impl<V> Clone for Snapshot<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            stats: self.stats,
        }
    }
}

impl<V> Default for Snapshot<V> {
    fn default() -> Self {
        Self::new(None, Stats::EMPTY)
    }
}

impl<V> PartialEq for Snapshot<V> {
    /// Two snapshots are equal when they pin the same root and counters.
    fn eq(&self, other: &Self) -> bool {
        let same_root = match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        };
        same_root && self.stats == other.stats
    }
}

impl<V: fmt::Debug> fmt::Debug for Snapshot<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a Snapshot<V> {
    type Item = (Key, &'a V);
    type IntoIter = SnapshotIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An in-order iterator over the entries of a [`Snapshot`].
///
/// Holds at most one pending node per level, so memory use is bounded by
/// the tree height.
pub struct SnapshotIterator<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> SnapshotIterator<'a, V> {
    fn descend_left(&mut self, mut node: Option<&'a Node<V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, V> Iterator for SnapshotIterator<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right());
        Some((node.key, node.value()))
    }
}

impl<V> FusedIterator for SnapshotIterator<'_, V> {}
