//! Single rotations and the height-driven rebalance used after removals.
//!
//! Rotations never touch their input. They build two new nodes and re-link
//! the three untouched subtrees by reference.

use super::ReferenceCounter;
use super::node::Node;

/// Rotates the subtree right around `node`.
///
/// ```text
///         y                x
///        / \              / \
///       x   T3    ->    T1   y
///      / \                  / \
///    T1   T2              T2   T3
/// ```
///
/// Returns `None` when `node` has no left child to pivot on.
pub(crate) fn rotate_right<V>(node: &Node<V>) -> Option<Node<V>> {
    let pivot = node.left.as_ref()?;
    let demoted = node.with_children(pivot.right.clone(), node.right.clone());
    tracing::trace!(pivot = pivot.key, demoted = node.key, "rotate right");
    Some(pivot.with_children(pivot.left.clone(), Some(ReferenceCounter::new(demoted))))
}

/// Rotates the subtree left around `node`. Mirror of [`rotate_right`].
///
/// Returns `None` when `node` has no right child to pivot on.
pub(crate) fn rotate_left<V>(node: &Node<V>) -> Option<Node<V>> {
    let pivot = node.right.as_ref()?;
    let demoted = node.with_children(node.left.clone(), pivot.left.clone());
    tracing::trace!(pivot = pivot.key, demoted = node.key, "rotate left");
    Some(pivot.with_children(Some(ReferenceCounter::new(demoted)), pivot.right.clone()))
}

/// Left-Right case: rotate the left child left, then `node` right.
///
/// Returns `None` when the left child has no right grandchild to rotate
/// through.
pub(crate) fn rotate_left_right<V>(node: &Node<V>) -> Option<Node<V>> {
    let rotated_left = rotate_left(node.left.as_ref()?)?;
    let pivoted = node.with_children(Some(ReferenceCounter::new(rotated_left)), node.right.clone());
    rotate_right(&pivoted)
}

/// Right-Left case: rotate the right child right, then `node` left.
///
/// Returns `None` when the right child has no left grandchild to rotate
/// through.
pub(crate) fn rotate_right_left<V>(node: &Node<V>) -> Option<Node<V>> {
    let rotated_right = rotate_right(node.right.as_ref()?)?;
    let pivoted = node.with_children(node.left.clone(), Some(ReferenceCounter::new(rotated_right)));
    rotate_left(&pivoted)
}

/// Restores the AVL invariant at `node` by looking only at heights.
///
/// Used on the removal path, where there is no inserted key to steer the
/// case analysis. Children are assumed to already satisfy the invariant.
pub(crate) fn rebalance<V>(node: Node<V>) -> Node<V> {
    let balance = node.balance_factor();

    if balance > 1 {
        let left_leans_right = node.left.as_ref().is_some_and(|left| left.balance_factor() < 0);
        let rotated = if left_leans_right {
            rotate_left_right(&node)
        } else {
            rotate_right(&node)
        };
        return rotated.unwrap_or(node);
    }

    if balance < -1 {
        let right_leans_left = node.right.as_ref().is_some_and(|right| right.balance_factor() > 0);
        let rotated = if right_leans_left {
            rotate_right_left(&node)
        } else {
            rotate_left(&node)
        };
        return rotated.unwrap_or(node);
    }

    node
}
