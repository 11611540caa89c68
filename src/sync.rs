//! Thread-safe tree handle.

use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::config::Config;
use crate::error::Result;
use crate::iter::NodeView;
use crate::tree::PrefixTree;

/// A [`PrefixTree`] behind a single reader/writer lock.
///
/// `add`, `remove` and `cleanup` take the lock exclusively; lookups,
/// traversal and rendering share it. There is no finer-grained locking, so
/// every writer excludes every reader for the duration of its call.
pub struct SafePrefixTree<V> {
    inner: RwLock<PrefixTree<V>>,
}

impl<V> SafePrefixTree<V>
where
    V: Clone,
{
    /// Create a new empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new empty tree with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: RwLock::new(PrefixTree::with_config(config)),
        }
    }

    /// Register `value` under `key`, replacing any previous value.
    pub fn add(&self, key: impl AsRef<[u8]>, value: V) {
        self.inner.write().add(key, value);
    }

    /// Register an optional value; `None` is refused with
    /// [`Error::InvalidValue`](crate::Error::InvalidValue).
    pub fn try_add(&self, key: impl AsRef<[u8]>, value: Option<V>) -> Result<()> {
        self.inner.write().try_add(key, value)
    }

    /// Get a copy of the value for the most specific registered prefix of
    /// `key`.
    pub fn lookup(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.read().lookup(key).cloned()
    }

    /// Remove the value registered at exactly `key`.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Prune nodes left without a value or children.
    pub fn cleanup(&self) {
        self.inner.write().cleanup();
    }

    /// Call `visit` on every node while holding the read lock.
    pub fn iterate(&self, visit: impl FnMut(NodeView<'_, V>)) {
        self.inner.read().iterate(visit);
    }

    /// Snapshot of the registered `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(Vec<u8>, V)> {
        self.inner
            .read()
            .entries()
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if no key is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for several operations in a row.
    pub fn read(&self) -> RwLockReadGuard<'_, PrefixTree<V>> {
        self.inner.read()
    }
}

impl<V: Clone> Default for SafePrefixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Display for SafePrefixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}

impl<V> From<PrefixTree<V>> for SafePrefixTree<V> {
    fn from(tree: PrefixTree<V>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}
