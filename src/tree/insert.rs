//! Copy-on-write insertion.
//!
//! The descent rebuilds every node on the path from the insertion point back
//! to the root and rebalances each rebuilt ancestor. Nodes off the path are
//! shared with the previous version of the tree.

use super::ReferenceCounter;
use super::node::{Key, Node};
use super::rotation::{rotate_left, rotate_left_right, rotate_right, rotate_right_left};
use std::cmp::Ordering;

/// What an insertion did to the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// A new node was linked in.
    Added,
    /// The key was present; only its value changed.
    Replaced,
}

/// Inserts `key` into the subtree rooted at `node` and returns the new
/// subtree root.
pub(crate) fn insert<V>(
    node: Option<&ReferenceCounter<Node<V>>>,
    key: Key,
    value: ReferenceCounter<V>,
) -> (ReferenceCounter<Node<V>>, Insertion) {
    let Some(node) = node else {
        return (ReferenceCounter::new(Node::leaf(key, value)), Insertion::Added);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, insertion) = insert(node.left.as_ref(), key, value);
            let rebuilt = node.with_children(Some(left), node.right.clone());
            (ReferenceCounter::new(settle(rebuilt, key, insertion)), insertion)
        }
        Ordering::Greater => {
            let (right, insertion) = insert(node.right.as_ref(), key, value);
            let rebuilt = node.with_children(node.left.clone(), Some(right));
            (ReferenceCounter::new(settle(rebuilt, key, insertion)), insertion)
        }
        Ordering::Equal => (
            ReferenceCounter::new(node.with_value(value)),
            Insertion::Replaced,
        ),
    }
}

fn settle<V>(node: Node<V>, key: Key, insertion: Insertion) -> Node<V> {
    match insertion {
        Insertion::Added => rebalance_after_insert(node, key),
        Insertion::Replaced => node,
    }
}

/// Picks the rotation case by comparing the inserted key with the heavy
/// child's key.
///
/// When the heavy side was not grown by this insertion (only possible after
/// removals that skipped rotations) a double rotation may find no grandchild
/// to pivot on. The node is then returned unrotated.
fn rebalance_after_insert<V>(node: Node<V>, key: Key) -> Node<V> {
    let balance = node.balance_factor();

    if balance > 1 {
        let Some(left_key) = node.left.as_ref().map(|left| left.key) else {
            return node;
        };
        let rotated = if key < left_key {
            rotate_right(&node)
        } else {
            rotate_left_right(&node)
        };
        return rotated.unwrap_or_else(|| {
            tracing::trace!(key = node.key, "left-right rotation has no grandchild, skipped");
            node
        });
    }

    if balance < -1 {
        let Some(right_key) = node.right.as_ref().map(|right| right.key) else {
            return node;
        };
        let rotated = if key > right_key {
            rotate_left(&node)
        } else {
            rotate_right_left(&node)
        };
        return rotated.unwrap_or_else(|| {
            tracing::trace!(key = node.key, "right-left rotation has no grandchild, skipped");
            node
        });
    }

    node
}
