//! Insertion and removal counters.

use std::fmt;

/// Running counters of a tree.
///
/// Counters are published together with the root they describe, so a
/// snapshot never reports more entries than it can reach.
///
/// # Examples
///
/// ```rust
/// use snaptree::tree::AvlTree;
///
/// let tree = AvlTree::new();
/// tree.insert(1, "one");
/// tree.insert(2, "two");
/// tree.insert(2, "TWO");
/// tree.drop_minimum();
///
/// let stats = tree.stats();
/// assert_eq!(stats.added(), 2);
/// assert_eq!(stats.dropped(), 1);
/// assert_eq!(stats.size(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    added: u64,
    dropped: u64,
}

impl Stats {
    /// Counters of an empty tree.
    pub const EMPTY: Self = Self {
        added: 0,
        dropped: 0,
    };

    /// Number of insertions that linked a new key.
    #[inline]
    #[must_use]
    pub const fn added(&self) -> u64 {
        self.added
    }

    /// Number of counted drop-minimum calls.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// `added - dropped`. Negative only when drops on an empty tree are
    /// counted.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> i64 {
        self.added.cast_signed() - self.dropped.cast_signed()
    }

    #[inline]
    pub(crate) const fn record_added(self) -> Self {
        Self {
            added: self.added + 1,
            ..self
        }
    }

    #[inline]
    pub(crate) const fn record_dropped(self) -> Self {
        Self {
            dropped: self.dropped + 1,
            ..self
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "added: {}, dropped: {}, size: {}",
            self.added,
            self.dropped,
            self.size()
        )
    }
}
