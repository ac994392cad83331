//! Runtime configuration for [`AvlTree`](crate::tree::AvlTree).

/// How the drop-minimum engine treats the ancestors of the removed node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemovalRebalance {
    /// Recompute heights and rotate wherever an ancestor became unbalanced.
    /// The AVL invariant holds after every removal.
    #[default]
    Full,
    /// Recompute heights only. Repeated removals can leave the right side of
    /// an ancestor arbitrarily taller than its left side.
    HeightOnly,
}

/// Settings fixed at construction time of an [`AvlTree`](crate::tree::AvlTree).
///
/// # Examples
///
/// ```rust
/// use snaptree::config::{RemovalRebalance, TreeConfig};
///
/// let config = TreeConfig::new()
///     .removal_rebalance(RemovalRebalance::HeightOnly)
///     .count_empty_drops(true);
///
/// assert_eq!(config.removal_rebalance_mode(), RemovalRebalance::HeightOnly);
/// assert!(config.counts_empty_drops());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    removal_rebalance: RemovalRebalance,
    count_empty_drops: bool,
}

impl TreeConfig {
    /// Returns the default configuration: full rebalancing on removal, and
    /// dropping from an empty tree leaves the counters alone.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            removal_rebalance: RemovalRebalance::Full,
            count_empty_drops: false,
        }
    }

    /// Sets the rebalancing mode of the drop-minimum engine.
    #[inline]
    #[must_use]
    pub const fn removal_rebalance(mut self, mode: RemovalRebalance) -> Self {
        self.removal_rebalance = mode;
        self
    }

    /// When `true`, `drop_minimum` on an empty tree still increments the
    /// `dropped` counter, so `size` can go negative.
    #[inline]
    #[must_use]
    pub const fn count_empty_drops(mut self, enabled: bool) -> Self {
        self.count_empty_drops = enabled;
        self
    }

    /// Returns the configured removal rebalancing mode.
    #[inline]
    #[must_use]
    pub const fn removal_rebalance_mode(&self) -> RemovalRebalance {
        self.removal_rebalance
    }

    /// Returns whether drops on an empty tree are counted.
    #[inline]
    #[must_use]
    pub const fn counts_empty_drops(&self) -> bool {
        self.count_empty_drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_matches_default() {
        assert_eq!(TreeConfig::new(), TreeConfig::default());
        assert_eq!(TreeConfig::new().removal_rebalance_mode(), RemovalRebalance::Full);
        assert!(!TreeConfig::new().counts_empty_drops());
    }

    #[rstest]
    fn test_setters_are_independent() {
        let config = TreeConfig::new().count_empty_drops(true);
        assert_eq!(config.removal_rebalance_mode(), RemovalRebalance::Full);
        assert!(config.counts_empty_drops());
    }
}
