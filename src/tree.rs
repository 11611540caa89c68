//! Unsynchronized tree handle.

use std::fmt;

use crate::config::Config;
use crate::error::Result;
use crate::iter::{Entries, Iter, NodeView};
use crate::node::Node;

/// A prefix tree mapping path-like keys to values.
///
/// Lookups resolve to the most specific registered key that is a prefix of
/// the requested one. For shared access from several threads use
/// [`SafePrefixTree`](crate::SafePrefixTree).
#[derive(Clone)]
pub struct PrefixTree<V> {
    root: Node<V>,
    config: Config,
}

impl<V> PrefixTree<V> {
    /// Create an empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            root: Node::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The root node, for inspection.
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Register `value` under `key`, replacing any previous value.
    pub fn add(&mut self, key: impl AsRef<[u8]>, value: V) {
        self.root
            .insert(key.as_ref(), value, self.config.reorder_children);
    }

    /// Register an optional value; `None` is refused with
    /// [`Error::InvalidValue`](crate::Error::InvalidValue).
    pub fn try_add(&mut self, key: impl AsRef<[u8]>, value: Option<V>) -> Result<()> {
        self.root
            .try_insert(key.as_ref(), value, self.config.reorder_children)
    }

    /// Value of the most specific registered key that is a prefix of `key`.
    pub fn lookup(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.root.lookup(key)
    }

    /// Remove and return the value registered at exactly `key`.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let value = self.root.remove(key);
        if value.is_some() && self.config.auto_cleanup {
            self.root.cleanup();
        }
        value
    }

    /// Prune nodes left without a value or children.
    pub fn cleanup(&mut self) {
        self.root.cleanup();
    }

    /// Call `visit` on every node, parent first.
    pub fn iterate(&self, visit: impl FnMut(NodeView<'_, V>)) {
        self.root.iterate(visit);
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.root.iter()
    }

    /// Registered `(key, value)` pairs in traversal order.
    pub fn entries(&self) -> Entries<'_, V> {
        self.root.entries()
    }

    /// Number of registered keys. Walks the whole tree.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

impl<V> Default for PrefixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Display for PrefixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
