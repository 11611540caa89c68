//! Facade configuration.

/// Configuration for [`PrefixTree`](crate::PrefixTree) and
/// [`SafePrefixTree`](crate::SafePrefixTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prune orphan nodes after every successful remove.
    pub auto_cleanup: bool,
    /// Move frequently traversed children toward the front of their
    /// sibling list. Priorities are counted either way.
    pub reorder_children: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_cleanup: false,
            reorder_children: true,
        }
    }
}
