//! Copy-on-write removal of the smallest key.

use super::ReferenceCounter;
use super::node::{Key, Link, Node};
use super::rotation::rebalance;
use crate::config::RemovalRebalance;

/// Removes the leftmost node of the subtree rooted at `node`.
///
/// Returns the new subtree root together with the removed key. The leftmost
/// node is replaced by its right child; every ancestor on the left spine is
/// rebuilt with a fresh height, and rotated as well under
/// [`RemovalRebalance::Full`].
pub(crate) fn drop_minimum<V>(node: &Node<V>, mode: RemovalRebalance) -> (Link<V>, Key) {
    let Some(left) = node.left.as_ref() else {
        return (node.right.clone(), node.key);
    };

    let (new_left, removed) = drop_minimum(left, mode);
    let rebuilt = node.with_children(new_left, node.right.clone());
    let rebuilt = match mode {
        RemovalRebalance::Full => rebalance(rebuilt),
        RemovalRebalance::HeightOnly => rebuilt,
    };
    (Some(ReferenceCounter::new(rebuilt)), removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::insert::insert;
    use rstest::rstest;

    fn build(keys: impl IntoIterator<Item = Key>) -> Link<Key> {
        keys.into_iter().fold(None, |root, key| {
            Some(insert(root.as_ref(), key, ReferenceCounter::new(key)).0)
        })
    }

    fn keys_of(node: Option<&Node<Key>>) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut stack = Vec::new();
        let mut current = node;
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            if let Some(node) = stack.pop() {
                keys.push(node.key());
                current = node.right();
            }
        }
        keys
    }

    #[rstest]
    fn test_drop_single_node_leaves_empty() {
        let root = build([1]).unwrap();
        let (remaining, removed) = drop_minimum(&root, RemovalRebalance::Full);
        assert!(remaining.is_none());
        assert_eq!(removed, 1);
    }

    #[rstest]
    fn test_drop_promotes_right_child() {
        // 1(-, 2)
        let root = build([1, 2]).unwrap();
        let (remaining, removed) = drop_minimum(&root, RemovalRebalance::Full);
        let remaining = remaining.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(remaining.key(), 2);
        assert!(ReferenceCounter::ptr_eq(&remaining, root.right.as_ref().unwrap()));
    }

    #[rstest]
    fn test_drop_shares_right_subtree() {
        let root = build(1..=7).unwrap();
        let (remaining, _) = drop_minimum(&root, RemovalRebalance::Full);
        let remaining = remaining.unwrap();

        assert!(ReferenceCounter::ptr_eq(
            remaining.right.as_ref().unwrap(),
            root.right.as_ref().unwrap()
        ));
    }

    #[rstest]
    #[case(RemovalRebalance::Full)]
    #[case(RemovalRebalance::HeightOnly)]
    fn test_repeated_drops_remove_in_ascending_order(#[case] mode: RemovalRebalance) {
        let mut root = build([50, 20, 80, 10, 30, 70, 90, 60]);
        let mut removed = Vec::new();

        while let Some(node) = root {
            let (remaining, key) = drop_minimum(&node, mode);
            removed.push(key);
            root = remaining;
        }

        assert_eq!(removed, vec![10, 20, 30, 50, 60, 70, 80, 90]);
    }

    #[rstest]
    fn test_full_mode_rotates_right_heavy_ancestor() {
        // 2(1, 4(3, 5)); removing 1 leaves 2 two levels lighter on the left
        let root = build([2, 1, 4, 3, 5]).unwrap();
        let (remaining, _) = drop_minimum(&root, RemovalRebalance::Full);
        let remaining = remaining.unwrap();

        assert_eq!(remaining.key(), 4);
        assert_eq!(remaining.height(), 3);
        assert!(remaining.balance_factor().abs() <= 1);
        assert_eq!(keys_of(Some(&remaining)), vec![2, 3, 4, 5]);
    }

    #[rstest]
    fn test_height_only_mode_keeps_shape() {
        let root = build([2, 1, 4, 3, 5]).unwrap();
        let (remaining, _) = drop_minimum(&root, RemovalRebalance::HeightOnly);
        let remaining = remaining.unwrap();

        assert_eq!(remaining.key(), 2);
        assert_eq!(remaining.height(), 3);
        assert_eq!(remaining.balance_factor(), -2);
        assert_eq!(keys_of(Some(&remaining)), vec![2, 3, 4, 5]);
    }
}
