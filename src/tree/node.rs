//! Immutable AVL vertices and the height utilities built on them.
//!
//! A [`Node`] is never mutated once it is constructed. Every update in the
//! tree produces fresh nodes along the changed path and re-links the
//! untouched subtrees by reference.

use super::ReferenceCounter;
use std::fmt;

/// The key type of the tree. Keys are fixed-width signed integers.
pub type Key = i64;

/// An owning reference to a child subtree, or `None` for the empty tree.
pub(crate) type Link<V> = Option<ReferenceCounter<Node<V>>>;

// =============================================================================
// Node Definition
// =============================================================================

/// A vertex of the AVL tree.
///
/// Nodes are reachable only through a [`Snapshot`](super::Snapshot) and are
/// read-only from the outside. The value is held behind a reference counter
/// so rebuilding a path never copies a payload.
pub struct Node<V> {
    pub(crate) key: Key,
    pub(crate) value: ReferenceCounter<V>,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
    pub(crate) height: usize,
}

impl<V> Node<V> {
    /// Creates a leaf with height 1.
    pub(crate) const fn leaf(key: Key, value: ReferenceCounter<V>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Creates a node with explicit children. The height is computed once,
    /// here, from the children's cached heights.
    pub(crate) fn branch(key: Key, value: ReferenceCounter<V>, left: Link<V>, right: Link<V>) -> Self {
        let height = compute_height(left.as_ref(), right.as_ref());
        Self {
            key,
            value,
            left,
            right,
            height,
        }
    }

    /// Creates a copy of this node with new children.
    pub(crate) fn with_children(&self, left: Link<V>, right: Link<V>) -> Self {
        Self::branch(self.key, ReferenceCounter::clone(&self.value), left, right)
    }

    /// Creates a copy of this node holding a replacement value.
    ///
    /// Children and height are carried over unchanged.
    pub(crate) fn with_value(&self, value: ReferenceCounter<V>) -> Self {
        Self {
            key: self.key,
            value,
            left: self.left.clone(),
            right: self.right.clone(),
            height: self.height,
        }
    }

    /// `height(left) - height(right)`.
    pub(crate) fn balance_factor(&self) -> isize {
        height_of(self.left.as_ref()).cast_signed() - height_of(self.right.as_ref()).cast_signed()
    }

    /// Returns the key stored in this node.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }

    /// Returns the value stored in this node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the left child, holding smaller keys.
    #[inline]
    #[must_use]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, holding larger keys.
    #[inline]
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the cached height of the subtree rooted here. A leaf has
    /// height 1.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

// =============================================================================
// Height Utilities
// =============================================================================

/// Returns the cached height of a subtree, 0 for the empty tree.
#[inline]
pub(crate) fn height_of<V>(node: Option<&ReferenceCounter<Node<V>>>) -> usize {
    node.map_or(0, |node| node.height)
}

/// `1 + max(height(left), height(right))`.
#[inline]
pub(crate) fn compute_height<V>(
    left: Option<&ReferenceCounter<Node<V>>>,
    right: Option<&ReferenceCounter<Node<V>>>,
) -> usize {
    1 + height_of(left).max(height_of(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn leaf(key: Key) -> ReferenceCounter<Node<&'static str>> {
        ReferenceCounter::new(Node::leaf(key, ReferenceCounter::new("leaf")))
    }

    #[rstest]
    fn test_height_of_empty_is_zero() {
        assert_eq!(height_of::<i32>(None), 0);
    }

    #[rstest]
    fn test_leaf_has_height_one() {
        let node = leaf(7);
        assert_eq!(height_of(Some(&node)), 1);
        assert_eq!(node.balance_factor(), 0);
    }

    #[rstest]
    #[case(None, None, 1)]
    #[case(Some(1), None, 2)]
    #[case(None, Some(1), 2)]
    #[case(Some(1), Some(1), 2)]
    fn test_compute_height(
        #[case] left: Option<Key>,
        #[case] right: Option<Key>,
        #[case] expected: usize,
    ) {
        let left = left.map(leaf);
        let right = right.map(leaf);
        assert_eq!(compute_height(left.as_ref(), right.as_ref()), expected);
    }

    #[rstest]
    fn test_branch_caches_height_and_balance() {
        let inner = ReferenceCounter::new(Node::branch(
            2,
            ReferenceCounter::new("inner"),
            Some(leaf(1)),
            None,
        ));
        let outer = Node::branch(3, ReferenceCounter::new("outer"), Some(inner), None);

        assert_eq!(outer.height(), 3);
        assert_eq!(outer.balance_factor(), 2);
        assert_eq!(outer.left().map(Node::key), Some(2));
        assert!(outer.right().is_none());
    }

    #[rstest]
    fn test_with_value_keeps_shape() {
        let node = Node::branch(5, ReferenceCounter::new("old"), Some(leaf(1)), Some(leaf(9)));
        let replaced = node.with_value(ReferenceCounter::new("new"));

        assert_eq!(*replaced.value(), "new");
        assert_eq!(*node.value(), "old");
        assert_eq!(replaced.height(), node.height());
        assert!(ReferenceCounter::ptr_eq(
            replaced.left.as_ref().unwrap(),
            node.left.as_ref().unwrap()
        ));
    }
}
